//! Core pipeline stages for pii-curator.
//!
//! # Modules
//!
//! - [`modify`] - The [`DocumentModifier`](modify::DocumentModifier) seam and
//!   the [`Modify`](modify::Modify) stage that applies one across partitions
//! - [`filter`] - Score-and-keep document filters and their registry
//!
//! # Example
//!
//! ```rust,no_run
//! use pii_curator::config::PiiConfig;
//! use pii_curator::core::modify::Modify;
//! use pii_curator::domain::DocumentBatch;
//! use pii_curator::pii::LlmPiiModifier;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let modifier = LlmPiiModifier::new(PiiConfig::new("http://0.0.0.0:8000/v1"))?;
//! let modify = Modify::new(Arc::new(modifier));
//!
//! let partitions = vec![DocumentBatch::from_texts(["Sarah and Ryan went out to play"])];
//! let redacted = modify.apply(&partitions).await?;
//!
//! println!("{}", redacted[0].documents()[0].text);
//! # Ok(())
//! # }
//! ```

pub mod filter;
pub mod modify;
