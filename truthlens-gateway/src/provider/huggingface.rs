//! Hugging Face Inference API provider (zero-shot classification).

use super::{ClassificationProvider, ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use truthlens_common::config::HuggingFaceConfig;

/// Message used when an error response carries no `error` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "Hugging Face API error";

/// Hugging Face hosted inference provider.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    model_id: String,
    endpoint: String,
    wait_for_model: bool,
}

impl HuggingFaceProvider {
    /// Create a provider from configuration.
    ///
    /// Without a token the request is sent unauthenticated and the upstream
    /// rejection is reported like any other upstream error.
    pub fn from_config(config: &HuggingFaceConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = config.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("HF_API_TOKEN contains invalid header characters, sending without it");
                }
            }
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model_id: config.model_id.clone(),
            endpoint: config.model_url(),
            wait_for_model: config.wait_for_model,
        })
    }

    /// The model endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClassificationProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn model(&self) -> &str {
        &self.model_id
    }

    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ProviderResult, ProviderError> {
        let start = Instant::now();

        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
            options: InferenceOptions {
                wait_for_model: self.wait_for_model,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            model = %self.model_id,
            status = status.as_u16(),
            latency_ms,
            "Inference API responded"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).ok_or_else(|| {
                ProviderError::MalformedPayload(format!(
                    "unreadable error body with status {}",
                    status.as_u16()
                ))
            })?;
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let parsed: ZeroShotResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        Ok(ProviderResult::new(parsed.labels, parsed.scores))
    }
}

/// Pull the `error` field out of a JSON error body.
///
/// The API reports either a single string or a list of strings. A JSON body
/// without a usable `error` gets the fixed fallback message; a body that is
/// not JSON at all yields `None`.
fn extract_error_message(body: &str) -> Option<String> {
    let error = serde_json::from_str::<ErrorBody>(body).ok()?.error;

    let message = match error {
        Some(serde_json::Value::String(message)) if !message.is_empty() => message,
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            if messages.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => DEFAULT_ERROR_MESSAGE.to_string(),
    };

    Some(message)
}

// ============================================================================
// Inference API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}
