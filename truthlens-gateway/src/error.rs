//! Error types for the analyze endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;

/// Body reported when the request carries no usable text.
pub const NO_TEXT_MESSAGE: &str = "No text provided";

/// Body reported for transport failures and unusable provider payloads.
pub const COMMUNICATION_MESSAGE: &str = "Error communicating with Hugging Face API";

/// Body reported when the request exceeds the configured size limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Ways an analysis can fail. Every variant is terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// Text missing, null, or blank.
    #[error("No text provided")]
    Validation,

    /// Request body over the size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Provider answered with a non-success status.
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Provider unreachable or its payload unusable. The detail is logged only.
    #[error("Error communicating with Hugging Face API: {0}")]
    Communication(String),
}

impl AnalyzeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Communication(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation => NO_TEXT_MESSAGE.to_string(),
            Self::PayloadTooLarge => PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Communication(_) => COMMUNICATION_MESSAGE.to_string(),
        }
    }
}

impl From<ProviderError> for AnalyzeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Upstream { status, message } => Self::Upstream { status, message },
            other => Self::Communication(other.to_string()),
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Validation | Self::PayloadTooLarge => {
                tracing::debug!(status = status.as_u16(), "Rejected analyze request: {}", self);
            }
            Self::Upstream { .. } => {
                tracing::warn!(status = status.as_u16(), error = %self, "Inference API error");
            }
            Self::Communication(_) => {
                tracing::error!(error = %self, "Inference API call failed");
            }
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, axum::Json(body)).into_response()
    }
}
