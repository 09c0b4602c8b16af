//! Error types shared by TruthLens services.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using the TruthLens error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for configuration and startup concerns.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an error with additional context.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Check if this error (or the error it wraps) is a validation failure.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to any error type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazily built context to an error.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<Error>::into(e).with_context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Into::<Error>::into(e).with_context(f()))
    }
}
