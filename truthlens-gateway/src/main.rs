//! TruthLens Gateway - Main entry point.

use anyhow::Result;
use truthlens_common::config::Config;
use truthlens_common::logging::init_logging_with_exclusions;

#[tokio::main]
async fn main() -> Result<()> {
    let startup_start = std::time::Instant::now();

    // Load configuration (file, then .env, then environment)
    let config = Config::load_with_env()?;

    init_logging_with_exclusions(
        &config.observability.log_level,
        &config.observability.log_format,
        &config.observability.excluded_targets,
    );

    tracing::info!("TruthLens Gateway v{}", env!("CARGO_PKG_VERSION"));

    config.validate()?;

    tracing::info!(
        duration_ms = startup_start.elapsed().as_millis() as u64,
        "Configuration loaded"
    );

    truthlens_gateway::start_server(&config).await
}
