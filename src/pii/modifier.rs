//! LLM PII modifier
//!
//! Orchestrates one batch: dispatch every text to the inference endpoint
//! under the concurrency ceiling, then redact each text with its own
//! validated entities. Either the whole batch is redacted or an error is
//! returned; partial output never escapes.

use crate::adapters::llm::{ChatCompletionsClient, EntityInference};
use crate::config::PiiConfig;
use crate::core::modify::DocumentModifier;
use crate::domain::{CuratorError, DocumentBatch, EntityList, Result};
use crate::pii::audit::AuditLogger;
use crate::pii::config::ResolvedPiiConfig;
use crate::pii::dispatcher::Dispatcher;
use crate::pii::redactor::batch_redact;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Outcome of redacting one batch
#[derive(Debug, Clone)]
pub struct RedactionOutcome {
    /// Redacted batch, aligned with the input
    pub batch: DocumentBatch,
    /// Validated entities per document, aligned with the input
    pub entities: Vec<EntityList>,
    /// Wall-clock time spent on the batch (ms)
    pub duration_ms: u64,
}

/// Redacts PII from document batches using an LLM endpoint
///
/// Configuration is resolved once at construction and never changes. The
/// modifier can be shared across tasks behind an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use pii_curator::config::PiiConfig;
/// use pii_curator::domain::DocumentBatch;
/// use pii_curator::pii::LlmPiiModifier;
///
/// # async fn example() -> pii_curator::domain::Result<()> {
/// let mut config = PiiConfig::new("http://0.0.0.0:8000/v1");
/// config.max_concurrent_requests = Some(8);
///
/// let modifier = LlmPiiModifier::new(config)?;
/// let batch = DocumentBatch::from_texts(["Sarah and Ryan went out to play"]);
/// let outcome = modifier.redact_batch(&batch).await?;
///
/// assert_eq!(outcome.batch.documents()[0].text, "[NAME] and [NAME] went out to play");
/// # Ok(())
/// # }
/// ```
pub struct LlmPiiModifier {
    config: Arc<ResolvedPiiConfig>,
    dispatcher: Dispatcher,
    audit_logger: AuditLogger,
}

impl LlmPiiModifier {
    /// Name used in logs and pipeline reports
    pub const NAME: &'static str = "llm_pii_modifier";

    /// Create a modifier talking to the configured chat-completions endpoint
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Configuration`] if the configuration is invalid
    /// or the HTTP client cannot be built, and an I/O error if the audit log
    /// directory cannot be created.
    pub fn new(config: PiiConfig) -> Result<Self> {
        let resolved = ResolvedPiiConfig::resolve(&config)?;
        let client = ChatCompletionsClient::new(&resolved)?;
        Self::from_resolved(resolved, Arc::new(client))
    }

    /// Create a modifier backed by any inference implementation
    pub fn with_inference(
        config: PiiConfig,
        inference: Arc<dyn EntityInference>,
    ) -> Result<Self> {
        Self::from_resolved(ResolvedPiiConfig::resolve(&config)?, inference)
    }

    fn from_resolved(
        config: ResolvedPiiConfig,
        inference: Arc<dyn EntityInference>,
    ) -> Result<Self> {
        let audit_logger = AuditLogger::from_config(config.audit())?;
        let dispatcher = Dispatcher::new(
            inference,
            config.concurrency(),
            config.dispatch_strategy(),
        );

        tracing::info!(
            model = %config.model(),
            labels = config.labels().len(),
            concurrency = ?config.concurrency(),
            strategy = ?config.dispatch_strategy(),
            "PII modifier ready"
        );

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
            audit_logger,
        })
    }

    /// Resolved configuration in effect
    pub fn config(&self) -> &ResolvedPiiConfig {
        &self.config
    }

    /// Warnings raised while resolving the configuration
    pub fn warnings(&self) -> &[String] {
        self.config.warnings()
    }

    /// Detect entities for every document without changing any text
    pub async fn detect_batch(&self, batch: &DocumentBatch) -> Result<Vec<EntityList>> {
        let entities = self.dispatcher.dispatch(&batch.texts()).await?;
        if entities.len() != batch.len() {
            return Err(CuratorError::Other(format!(
                "Inference returned {} results for {} documents",
                entities.len(),
                batch.len()
            )));
        }
        Ok(entities)
    }

    /// Detect and redact, returning entities alongside the redacted batch
    pub async fn redact_batch(&self, batch: &DocumentBatch) -> Result<RedactionOutcome> {
        let start = Instant::now();
        crate::log_batch_start!(Self::NAME, batch.len());

        let entities = self.detect_batch(batch).await?;
        let texts = batch_redact(&batch.texts(), &entities)?;
        let redacted = batch.with_texts(texts).map_err(CuratorError::Validation)?;

        for (document, document_entities) in batch.documents().iter().zip(&entities) {
            self.audit_logger
                .log_document(document.index, self.config.model(), document_entities)?;
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        crate::log_batch_complete!(Self::NAME, batch.len(), duration_ms);

        Ok(RedactionOutcome {
            batch: redacted,
            entities,
            duration_ms,
        })
    }
}

#[async_trait]
impl DocumentModifier for LlmPiiModifier {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn modify_batch(&self, batch: &DocumentBatch) -> Result<DocumentBatch> {
        Ok(self.redact_batch(batch).await?.batch)
    }
}
