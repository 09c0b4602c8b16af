//! TruthLens Common - Shared configuration, errors, and logging for TruthLens services.
//!
//! This crate provides:
//! - Configuration types and layered loading (defaults, JSON file, `.env`, environment)
//! - Configuration validation
//! - Error types and context helpers
//! - Logging setup with noise filtering

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{
    Config, HttpConfig, HuggingFaceConfig, LabelsConfig, NetworkConfig, ObservabilityConfig,
    StaticAssetsConfig,
};
pub use error::{Error, Result, ResultExt};
pub use validation::{Validate, ValidationError, ValidationResult};

