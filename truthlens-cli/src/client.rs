//! HTTP client for the TruthLens gateway.

use serde::Serialize;
use std::time::Duration;
use truthlens_gateway::{AnalysisResult, ErrorResponse};

/// Default gateway endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL (default: localhost:5000)
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 310,
        }
    }
}

/// Failure talking to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The gateway could not be reached.
    #[error("request failed: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status. `message` is the
    /// `error` field of the body, when there was one.
    #[error("gateway returned {status}")]
    Status { status: u16, message: Option<String> },

    /// The gateway answered successfully but the body was unreadable.
    #[error("invalid response: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// TruthLens gateway client.
pub struct GatewayClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Create a new client with default configuration.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Submit `text` to `POST /analyze`.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let url = format!("{}/analyze", self.config.endpoint.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Gateway responded");

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|m| !m.is_empty());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
