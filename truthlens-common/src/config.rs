//! Configuration management for TruthLens services.
//!
//! Configuration lives in an optional JSON file at `~/.truthlens/config.json`
//! (or the path named by `TRUTHLENS_CONFIG`).
//!
//! # Configuration Priority
//!
//! 1. Default values
//! 2. Config file values
//! 3. `.env` file entries (loaded into the process environment)
//! 4. Environment variables
//!
//! # Environment Variable Mapping
//!
//! - `PORT` → network.port
//! - `TRUTHLENS_BIND_ADDRESS` → network.bind
//! - `HF_API_TOKEN` → huggingface.api_token
//! - `HF_MODEL_ID` → huggingface.model_id
//! - `HF_API_BASE_URL` → huggingface.base_url
//! - `HF_TIMEOUT_SECS` → huggingface.timeout_secs
//! - `TRUTHLENS_STATIC_DIR` → static_assets.dir
//! - `TRUTHLENS_LOG_LEVEL` → observability.log_level
//! - `TRUTHLENS_LOG_FORMAT` → observability.log_format

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TRUTHLENS_CONFIG";

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".truthlens"),
        |dirs| dirs.home_dir().join(".truthlens"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| config_dir().join("config.json"))
}

// ============================================================================
// Network Configuration
// ============================================================================

/// Listening address for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address. Default: "0.0.0.0"
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// Listening port. Default: 5000
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5000
}

// ============================================================================
// Hugging Face Inference API
// ============================================================================

/// Upstream inference provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// Bearer token sent with every inference call
    #[serde(default)]
    pub api_token: Option<String>,

    /// Zero-shot classification model
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Inference API base URL (models are addressed as `{base_url}/models/{model_id}`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the outbound call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the API to wait for a cold model instead of failing fast
    #[serde(default = "default_true")]
    pub wait_for_model: bool,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            model_id: default_model_id(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            wait_for_model: true,
        }
    }
}

impl HuggingFaceConfig {
    /// The token, if one is configured and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Full URL of the configured model endpoint.
    pub fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model_id
        )
    }
}

fn default_model_id() -> String {
    "facebook/bart-large-mnli".into()
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".into()
}

fn default_timeout_secs() -> u64 {
    300
}

// ============================================================================
// HTTP surface
// ============================================================================

/// Browser UI served alongside the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticAssetsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding `index.html` and friends
    #[serde(default = "default_static_dir")]
    pub dir: String,
}

impl Default for StaticAssetsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> String {
    "frontend".into()
}

/// Request handling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Maximum accepted JSON body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_body_limit() -> usize {
    100 * 1024
}

// ============================================================================
// Label catalog overrides
// ============================================================================

/// Optional overrides for the candidate label set and explanation table.
///
/// Every field left unset falls back to the built-in catalog. Explanations
/// are merged over the built-in table entry by entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LabelsConfig {
    /// Replacement candidate labels, broad labels first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,

    /// Index of the first detailed label in `candidates`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_from: Option<usize>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub explanations: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_explanation: Option<String>,
}

// ============================================================================
// Observability
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets to hold at `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration structure for TruthLens services.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub huggingface: HuggingFaceConfig,

    #[serde(default)]
    pub static_assets: StaticAssetsConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration, then layer `.env` and environment variables on top.
    pub fn load_with_env() -> Result<Self> {
        // A missing .env is the common case
        let _ = dotenvy::dotenv();

        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Numeric values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.network.port = port;
        }
        if let Some(bind) = lookup("TRUTHLENS_BIND_ADDRESS") {
            self.network.bind = bind;
        }

        if let Some(token) = lookup("HF_API_TOKEN") {
            self.huggingface.api_token = Some(token);
        }
        if let Some(model) = lookup("HF_MODEL_ID") {
            self.huggingface.model_id = model;
        }
        if let Some(url) = lookup("HF_API_BASE_URL") {
            self.huggingface.base_url = url;
        }
        if let Some(secs) = lookup("HF_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.huggingface.timeout_secs = secs;
        }

        if let Some(dir) = lookup("TRUTHLENS_STATIC_DIR") {
            self.static_assets.dir = dir;
        }

        if let Some(level) = lookup("TRUTHLENS_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("TRUTHLENS_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// Get the `host:port` string the gateway binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.network.bind, self.network.port)
    }
}
