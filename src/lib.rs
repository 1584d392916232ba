// pii-curator - LLM-backed PII redaction for text datasets
// Copyright (c) 2025 pii-curator Contributors
// Licensed under the MIT License

//! # pii-curator - LLM-backed PII redaction
//!
//! pii-curator removes personally identifiable information from batches of
//! text before they are used for training. Each document is sent to an
//! OpenAI-compatible chat-completions endpoint that reports the PII it finds;
//! the reported entities are validated against the source text and every
//! occurrence is replaced with a label placeholder such as `[NAME]`.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** PII entities with schema-constrained LLM output
//! - **Validating** entities against the configured labels and the source text
//! - **Redacting** every occurrence of every entity, longest first
//! - **Dispatching** requests under a concurrency ceiling with order preserved
//! - **Filtering** documents with registered heuristic filters
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline stages (modify, filter)
//! - [`pii`] - Entity validation, redaction, dispatch, and the LLM modifier
//! - [`adapters`] - External integrations (chat-completions endpoint, JSONL files)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pii_curator::config::load_config;
//! use pii_curator::domain::DocumentBatch;
//! use pii_curator::pii::LlmPiiModifier;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("pii-curator.toml")?;
//!     let modifier = LlmPiiModifier::new(config.pii)?;
//!
//!     let batch = DocumentBatch::from_texts(["Sarah and Ryan went out to play"]);
//!     let outcome = modifier.redact_batch(&batch).await?;
//!
//!     println!("{}", outcome.batch.documents()[0].text);
//!     Ok(())
//! }
//! ```
//!
//! ## Redaction
//!
//! Redaction itself is pure and needs no endpoint:
//!
//! ```rust
//! use pii_curator::domain::{CandidateEntity, PiiLabel};
//! use pii_curator::pii::{redact, EntityValidator};
//!
//! let text = "Sarah Connor met Sarah";
//! let validator = EntityValidator::new(vec![PiiLabel::new("name").unwrap()]);
//! let entities = validator.validate_all(
//!     [
//!         CandidateEntity::new("name", "Sarah"),
//!         CandidateEntity::new("name", "Sarah Connor"),
//!     ],
//!     text,
//! );
//!
//! assert_eq!(redact(text, &entities), "[NAME] met [NAME]");
//! ```
//!
//! ## Error Handling
//!
//! All library errors are [`domain::CuratorError`]. A failed request fails
//! the whole batch; malformed model output only yields an empty entity list.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod pii;
