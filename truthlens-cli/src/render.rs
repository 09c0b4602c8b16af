//! Turning user input into a rendered analysis or error line.

use crate::client::{ClientError, GatewayClient};
use truthlens_gateway::AnalysisResult;

pub const EMPTY_INPUT_NOTICE: &str = "Please enter some text to analyze.";
pub const ANALYZING: &str = "Analyzing...";
pub const UNKNOWN_ERROR: &str = "Unknown error";
pub const COMMUNICATION_FAILURE: &str = "Error communicating with server.";

/// What the user ends up seeing for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Input was rejected locally; nothing was sent.
    Notice(String),
    /// The four-line analysis.
    Analysis(String),
    /// The gateway or the network failed.
    Error(String),
}

impl Rendered {
    pub fn text(&self) -> &str {
        match self {
            Self::Notice(text) | Self::Analysis(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    format!(
        "Category: {}\nType: {}\nConfidence: {}\nExplanation: {}",
        result.category, result.kind, result.confidence, result.explanation
    )
}

pub fn render_error(err: &ClientError) -> String {
    match err {
        ClientError::Status { message, .. } => {
            format!("Error: {}", message.as_deref().unwrap_or(UNKNOWN_ERROR))
        }
        ClientError::Transport(_) | ClientError::Decode(_) => COMMUNICATION_FAILURE.to_string(),
    }
}

/// Submit `raw_input` and render the outcome.
///
/// Blank input produces a notice without any request. Otherwise `on_progress`
/// is called once with [`ANALYZING`] before the request goes out.
pub async fn submit_and_render<F>(client: &GatewayClient, raw_input: &str, mut on_progress: F) -> Rendered
where
    F: FnMut(&str),
{
    let text = raw_input.trim();
    if text.is_empty() {
        return Rendered::Notice(EMPTY_INPUT_NOTICE.to_string());
    }

    on_progress(ANALYZING);

    match client.analyze(text).await {
        Ok(result) => Rendered::Analysis(render_analysis(&result)),
        Err(err) => {
            tracing::debug!(error = %err, "Analysis failed");
            Rendered::Error(render_error(&err))
        }
    }
}
