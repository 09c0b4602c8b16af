//! Text analysis: one provider call, then reduction to a single best label.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;
use truthlens_common::logging::generate_trace_id;

use crate::catalog::LabelCatalog;
use crate::error::AnalyzeError;
use crate::provider::{ClassificationProvider, ProviderResult};

/// `type` reported for broad labels and for no match at all.
pub const GENERAL_TYPE: &str = "General";

/// Outcome of an analysis, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Winning label, empty when no label scored above zero
    pub category: String,
    /// The winning label if it is a detailed subtype, otherwise `"General"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Winning score as a percentage with one decimal, e.g. `"82.3%"`
    pub confidence: String,
    pub explanation: String,
}

/// Highest-scoring label of a provider result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub label: &'a str,
    pub score: f64,
}

/// Arg-max over the parallel arrays.
///
/// Starts from an empty label at score zero and only moves on a strictly
/// greater score, so ties keep the earliest label and an all-zero result
/// keeps the empty label.
pub fn select_best(result: &ProviderResult) -> BestMatch<'_> {
    let mut best = BestMatch {
        label: "",
        score: 0.0,
    };

    for (label, &score) in result.labels.iter().zip(&result.scores) {
        if score > best.score {
            best = BestMatch { label, score };
        }
    }

    best
}

/// Render a 0..=1 score as a percentage with exactly one decimal.
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Classifies text through a provider against a fixed label catalog.
pub struct Classifier {
    provider: Arc<dyn ClassificationProvider>,
    catalog: Arc<LabelCatalog>,
}

impl Classifier {
    pub fn new(provider: Arc<dyn ClassificationProvider>, catalog: Arc<LabelCatalog>) -> Self {
        Self { provider, catalog }
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    /// Analyze `text`: validate, call the provider once, and reduce.
    ///
    /// Blank text fails before any provider call. Provider failures are
    /// returned as-is; nothing is retried.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        if text.trim().is_empty() {
            return Err(AnalyzeError::Validation);
        }

        let span = tracing::info_span!(
            "analyze",
            trace_id = %generate_trace_id(),
            provider = self.provider.name(),
            model = self.provider.model(),
            text_chars = text.chars().count(),
        );

        async {
            let result = self
                .provider
                .classify(text, self.catalog.candidates())
                .await?;
            result.ensure_aligned()?;

            let analysis = self.reduce(&result);
            tracing::info!(
                category = %analysis.category,
                confidence = %analysis.confidence,
                "Analysis complete"
            );
            Ok(analysis)
        }
        .instrument(span)
        .await
    }

    /// Turn a provider result into the client-facing analysis.
    pub fn reduce(&self, result: &ProviderResult) -> AnalysisResult {
        let best = select_best(result);

        let kind = if self.catalog.is_detailed(best.label) {
            best.label.to_string()
        } else {
            GENERAL_TYPE.to_string()
        };

        AnalysisResult {
            category: best.label.to_string(),
            kind,
            confidence: format_confidence(best.score),
            explanation: self.catalog.explain(best.label).to_string(),
        }
    }
}
