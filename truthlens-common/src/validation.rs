//! Configuration validation for TruthLens services.
//!
//! Provides validation logic for configuration fields to ensure
//! all required values are present and within valid ranges.

use std::collections::HashSet;
use thiserror::Error;

use crate::config::{
    Config, HttpConfig, HuggingFaceConfig, LabelsConfig, NetworkConfig, ObservabilityConfig,
};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let sections: [&dyn Validate; 5] = [
            &self.network,
            &self.huggingface,
            &self.http,
            &self.labels,
            &self.observability,
        ];

        let mut errors: Vec<ValidationError> = sections
            .iter()
            .filter_map(|section| section.validate().err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }
}

impl Validate for NetworkConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort {
                port: self.port,
                field: "network.port".into(),
            });
        }

        if self.bind.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "network.bind".into(),
            });
        }

        Ok(())
    }
}

impl Validate for HuggingFaceConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.model_id.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "huggingface.model_id".into(),
            });
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(ValidationError::InvalidValue {
                field: "huggingface.base_url".into(),
                reason: e.to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "huggingface.timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.body_limit_bytes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "http.body_limit_bytes".into(),
                reason: "must be greater than 0".into(),
            });
        }

        Ok(())
    }
}

impl Validate for LabelsConfig {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(ref candidates) = self.candidates {
            if candidates.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "labels.candidates".into(),
                    reason: "must contain at least one label".into(),
                });
            }

            let mut seen = HashSet::new();
            for label in candidates {
                if label.trim().is_empty() {
                    return Err(ValidationError::InvalidValue {
                        field: "labels.candidates".into(),
                        reason: "labels must not be blank".into(),
                    });
                }
                if !seen.insert(label.as_str()) {
                    return Err(ValidationError::InvalidValue {
                        field: "labels.candidates".into(),
                        reason: format!("duplicate label: {label}"),
                    });
                }
            }
        }

        // Only checkable here when both are overridden; the catalog re-checks
        // against its built-in list.
        if let (Some(candidates), Some(from)) = (&self.candidates, self.detailed_from) {
            if from > candidates.len() {
                return Err(ValidationError::InvalidValue {
                    field: "labels.detailed_from".into(),
                    reason: format!(
                        "{from} is past the end of {} candidate labels",
                        candidates.len()
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}
