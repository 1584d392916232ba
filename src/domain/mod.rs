//! Domain models and types for pii-curator.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Documents** ([`Document`], [`DocumentBatch`]) flowing in from the upstream runtime
//! - **Entities** ([`CandidateEntity`], [`ValidatedEntity`], [`PiiLabel`])
//! - **Error types** ([`CuratorError`], [`InferenceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Trust boundary
//!
//! The model reports entities by value, not by offset. A [`CandidateEntity`]
//! can only become a [`ValidatedEntity`] by passing the validator, and only
//! validated entities reach the redactor:
//!
//! ```rust
//! use pii_curator::domain::{CandidateEntity, PiiLabel};
//! use pii_curator::pii::EntityValidator;
//!
//! let validator = EntityValidator::new(vec![PiiLabel::new("name").unwrap()]);
//! let source = "Sarah and Ryan went out to play";
//!
//! assert!(validator.validate(&CandidateEntity::new("name", "Sarah"), source).is_some());
//! assert!(validator.validate(&CandidateEntity::new("name", "Jensen"), source).is_none());
//! ```

pub mod document;
pub mod entity;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{Document, DocumentBatch};
pub use entity::{CandidateEntity, EntityList, PiiLabel, ValidatedEntity};
pub use errors::{CuratorError, InferenceError};
pub use result::Result;
