//! LLM-backed PII redaction
//!
//! # Pipeline
//!
//! 1. **Resolve** ([`ResolvedPiiConfig`]): validate configuration, pick the
//!    system prompt, surface warnings
//! 2. **Dispatch** ([`Dispatcher`]): one inference request per document under
//!    a concurrency ceiling, results kept in input order
//! 3. **Validate** ([`EntityValidator`]): drop entities whose label is not
//!    configured or whose text is not verbatim in the document
//! 4. **Redact** ([`redact`]): replace every occurrence of each entity with
//!    its label placeholder, longest entity first
//! 5. **Audit** ([`AuditLogger`]): optional hashed record of what was removed
//!
//! [`LlmPiiModifier`] runs all five for a batch.

pub mod audit;
pub mod config;
pub mod dispatcher;
pub mod modifier;
pub mod redactor;
pub mod report;
pub mod validator;

pub use audit::AuditLogger;
pub use config::ResolvedPiiConfig;
pub use dispatcher::{ConcurrencyLimit, Dispatcher};
pub use modifier::{LlmPiiModifier, RedactionOutcome};
pub use redactor::{batch_redact, redact};
pub use report::RedactionReport;
pub use validator::EntityValidator;
