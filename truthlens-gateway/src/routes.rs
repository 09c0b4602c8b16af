//! HTTP API routes.

use crate::classifier::{AnalysisResult, Classifier};
use crate::error::AnalyzeError;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
}

impl AppState {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }
}

/// Build the API routes. `body_limit` caps request bodies in bytes.
pub fn build_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Analysis
        .route("/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ============ Health Check ============

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        service: "truthlens-gateway".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

// ============ Analysis ============

/// Body of `POST /analyze`. Extra fields are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AnalyzeError::PayloadTooLarge);
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Unreadable analyze body");
            AnalyzeRequest::default()
        }
    };

    let text = request.text.unwrap_or_default();
    let result = state.classifier.analyze(&text).await?;

    Ok(Json(result))
}
