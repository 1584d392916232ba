//! Configuration schema types
//!
//! This module defines the configuration structure for pii-curator. Values
//! here are as written by the user; [`ResolvedPiiConfig`](crate::pii::ResolvedPiiConfig)
//! is the immutable form the pipeline actually runs with.

use crate::config::prompts::{
    default_pii_labels, DEFAULT_LANGUAGE, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};
use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Main pii-curator configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// LLM PII redaction settings
    pub pii: PiiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CuratorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.pii.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (detect entities, leave text untouched)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// How requests are scheduled under the concurrency ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Consecutive slices; each slice finishes before the next starts
    #[default]
    SliceBarrier,
    /// At most N in flight; a new request starts as soon as one finishes
    SlidingWindow,
}

/// How schema-constrained decoding is requested from the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructuredOutputMode {
    /// `nvext.guided_json` (NIM / vLLM style)
    #[default]
    Nvext,
    /// OpenAI `response_format` with a `json_schema`
    ResponseFormat,
}

/// LLM PII redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiConfig {
    /// Base URL of the OpenAI-compatible endpoint (e.g. `http://0.0.0.0:8000/v1`)
    pub base_url: String,

    /// Credential for the endpoint (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// System prompt per model identifier
    #[serde(default = "default_system_prompts")]
    pub system_prompts: HashMap<String, String>,

    /// Labels the model may report
    #[serde(default = "default_pii_labels")]
    pub pii_labels: Vec<String>,

    /// Language of the documents (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum requests in flight; unset means the whole batch at once
    #[serde(default)]
    pub max_concurrent_requests: Option<usize>,

    /// Scheduling strategy under the ceiling
    #[serde(default)]
    pub dispatch_strategy: DispatchStrategy,

    /// Wire format of the schema constraint
    #[serde(default)]
    pub structured_output: StructuredOutputMode,

    /// `max_tokens` sent with every request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Redaction audit log
    #[serde(default)]
    pub audit: AuditConfig,
}

impl PiiConfig {
    /// Configuration with defaults for everything but the endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("pii.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("pii.base_url is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("pii.base_url must start with http:// or https://".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("pii.model cannot be empty".to_string());
        }

        if self.pii_labels.is_empty() {
            return Err("pii.pii_labels cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for label in &self.pii_labels {
            let label = label.trim();
            if label.is_empty() {
                return Err("pii.pii_labels cannot contain blank labels".to_string());
            }
            if !seen.insert(label) {
                return Err(format!("pii.pii_labels contains duplicate label '{label}'"));
            }
        }

        if self.language.trim().is_empty() {
            return Err("pii.language cannot be empty".to_string());
        }

        if self.max_concurrent_requests == Some(0) {
            return Err(
                "pii.max_concurrent_requests must be a positive integer (omit it for no limit)"
                    .to_string(),
            );
        }

        if self.max_output_tokens == 0 {
            return Err("pii.max_output_tokens must be greater than 0".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("pii.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for PiiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: None,
            model: default_model(),
            system_prompts: default_system_prompts(),
            pii_labels: default_pii_labels(),
            language: default_language(),
            max_concurrent_requests: None,
            dispatch_strategy: DispatchStrategy::default(),
            structured_output: StructuredOutputMode::default(),
            max_output_tokens: default_max_output_tokens(),
            timeout_seconds: default_timeout_seconds(),
            audit: AuditConfig::default(),
        }
    }
}

/// Redaction audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path (JSON lines)
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rotating local files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Built-in prompt map: one entry for [`DEFAULT_MODEL`]
pub fn default_system_prompts() -> HashMap<String, String> {
    HashMap::from([(DEFAULT_MODEL.to_string(), DEFAULT_SYSTEM_PROMPT.to_string())])
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
