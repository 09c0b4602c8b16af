//! Classification provider abstraction.
//!
//! The gateway never talks to an inference service directly; it goes through
//! [`ClassificationProvider`], which lets tests swap in a deterministic fake.

mod huggingface;

pub use huggingface::{HuggingFaceProvider, DEFAULT_ERROR_MESSAGE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Provider Trait
// ============================================================================

/// Zero-shot text classification against a caller-supplied label set.
#[async_trait]
pub trait ClassificationProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get the model the provider classifies with.
    fn model(&self) -> &str;

    /// Score `text` against every label in `labels`.
    ///
    /// Exactly one upstream call is made; failures are never retried.
    async fn classify(&self, text: &str, labels: &[String])
        -> Result<ProviderResult, ProviderError>;
}

/// Error from a provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The provider could not be reached (connect, DNS, timeout, reset).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered successfully but the payload is unusable.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

// ============================================================================
// Result Types
// ============================================================================

/// Parallel label/score arrays as returned by a zero-shot classifier.
///
/// `labels[i]` is scored by `scores[i]`. Scores are not assumed sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl ProviderResult {
    pub fn new(labels: Vec<String>, scores: Vec<f64>) -> Self {
        Self { labels, scores }
    }

    /// Check that the arrays are non-empty and positionally aligned.
    pub fn ensure_aligned(&self) -> Result<(), ProviderError> {
        if self.scores.is_empty() || self.labels.is_empty() {
            return Err(ProviderError::MalformedPayload(
                "empty labels or scores".into(),
            ));
        }

        if self.labels.len() != self.scores.len() {
            return Err(ProviderError::MalformedPayload(format!(
                "{} labels but {} scores",
                self.labels.len(),
                self.scores.len()
            )));
        }

        Ok(())
    }
}
