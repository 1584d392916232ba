//! Resolved PII configuration
//!
//! [`PiiConfig`] is what the user wrote. [`ResolvedPiiConfig`] is what the
//! pipeline runs with: validated, prompt chosen, labels parsed, and fixed for
//! the life of the modifier. Resolving never touches the prompt map it reads
//! from, so two modifiers built from the same defaults cannot affect each other.

use crate::config::prompts::{DEFAULT_LANGUAGE, DEFAULT_SYSTEM_PROMPT};
use crate::config::{AuditConfig, DispatchStrategy, PiiConfig, SecretString, StructuredOutputMode};
use crate::domain::{CuratorError, PiiLabel, Result};
use crate::pii::dispatcher::ConcurrencyLimit;
use std::time::Duration;

/// Immutable, validated PII configuration
#[derive(Debug, Clone)]
pub struct ResolvedPiiConfig {
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    system_prompt: String,
    uses_default_prompt: bool,
    labels: Vec<PiiLabel>,
    language: String,
    concurrency: ConcurrencyLimit,
    dispatch_strategy: DispatchStrategy,
    structured_output: StructuredOutputMode,
    max_output_tokens: u32,
    timeout: Duration,
    audit: AuditConfig,
    warnings: Vec<String>,
}

impl ResolvedPiiConfig {
    /// Validate and resolve a user configuration
    ///
    /// Emits a warning (logged and kept in [`warnings`](Self::warnings)) when
    /// the model has no prompt of its own and the default is used, and when
    /// the language is not English while the default prompt is in use.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Configuration`] for any invalid value.
    pub fn resolve(config: &PiiConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| CuratorError::Configuration(format!("Invalid PII configuration: {e}")))?;

        let labels = config
            .pii_labels
            .iter()
            .map(|label| PiiLabel::new(label.as_str()).map_err(CuratorError::Configuration))
            .collect::<Result<Vec<_>>>()?;

        let concurrency = ConcurrencyLimit::from_config(config.max_concurrent_requests)
            .map_err(CuratorError::Configuration)?;

        let mut warnings = Vec::new();

        let custom_prompt = config
            .system_prompts
            .get(&config.model)
            .filter(|prompt| !prompt.trim().is_empty());
        let system_prompt = match custom_prompt {
            Some(prompt) => prompt.clone(),
            None => {
                warnings.push(format!(
                    "No system prompt configured for model '{}'; using the default prompt, \
                     which may not work well with this model",
                    config.model
                ));
                DEFAULT_SYSTEM_PROMPT.to_string()
            }
        };
        let uses_default_prompt = system_prompt == DEFAULT_SYSTEM_PROMPT;

        if uses_default_prompt && !config.language.eq_ignore_ascii_case(DEFAULT_LANGUAGE) {
            warnings.push(format!(
                "Language '{}' is not English but the default system prompt is in use; \
                 consider providing a prompt in that language",
                config.language
            ));
        }

        for warning in &warnings {
            tracing::warn!(model = %config.model, "{}", warning);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt,
            uses_default_prompt,
            labels,
            language: config.language.clone(),
            concurrency,
            dispatch_strategy: config.dispatch_strategy,
            structured_output: config.structured_output,
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.timeout_seconds),
            audit: config.audit.clone(),
            warnings,
        })
    }

    /// Endpoint base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The system prompt every request will carry
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Whether the built-in prompt is in use
    pub fn uses_default_prompt(&self) -> bool {
        self.uses_default_prompt
    }

    pub fn labels(&self) -> &[PiiLabel] {
        &self.labels
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn concurrency(&self) -> ConcurrencyLimit {
        self.concurrency
    }

    pub fn dispatch_strategy(&self) -> DispatchStrategy {
        self.dispatch_strategy
    }

    pub fn structured_output(&self) -> StructuredOutputMode {
        self.structured_output
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn audit(&self) -> &AuditConfig {
        &self.audit
    }

    /// Warnings raised while resolving
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
