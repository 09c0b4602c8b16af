//! TruthLens Gateway - zero-shot text analysis over the Hugging Face Inference API.
//!
//! A single `POST /analyze` endpoint scores submitted text against a fixed
//! set of misinformation, bias, and fallacy labels and reports the winner:
//! ```text
//! Client → Gateway (validate → classify → arg-max → explain) → Hugging Face
//! ```
//! The gateway optionally serves the static browser UI from the same port.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod provider;
pub mod routes;

pub use catalog::LabelCatalog;
pub use classifier::{format_confidence, select_best, AnalysisResult, Classifier, GENERAL_TYPE};
pub use error::{AnalyzeError, ErrorResponse};
pub use provider::{ClassificationProvider, HuggingFaceProvider, ProviderError, ProviderResult};
pub use routes::{build_routes, AppState};

use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use truthlens_common::config::Config;

/// Build application state from configuration.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let catalog = LabelCatalog::from_config(&config.labels)?;

    if config.huggingface.token().is_none() {
        tracing::warn!("HF_API_TOKEN is not set, requests will be sent unauthenticated");
    }

    let provider = HuggingFaceProvider::from_config(&config.huggingface)?;
    tracing::info!(
        model = %config.huggingface.model_id,
        endpoint = %provider.endpoint(),
        labels = catalog.candidates().len(),
        "Classifier ready"
    );

    Ok(AppState::new(Classifier::new(
        Arc::new(provider),
        Arc::new(catalog),
    )))
}

/// Build the gateway router with all routes and middleware.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = build_routes(state, config.http.body_limit_bytes);

    if config.static_assets.enabled {
        let dir = Path::new(&config.static_assets.dir);
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Static asset directory not found");
        }
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Start the gateway server and run until Ctrl-C.
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let state = build_state(config)?;
    let router = build_router(state, config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
