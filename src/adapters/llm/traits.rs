//! Inference client trait
//!
//! Abstracts the endpoint that turns one text into its validated entity list,
//! so the dispatcher and modifier can run against any backend or a test double.

use crate::domain::{EntityList, Result};
use async_trait::async_trait;

/// Detects PII entities in a single text
///
/// Implementations must return only entities that passed validation against
/// `text`, and must degrade malformed model output to an empty list. Only
/// transport failures (connection, timeout, non-success status) are errors.
#[async_trait]
pub trait EntityInference: Send + Sync {
    /// Detect entities in one text
    async fn infer(&self, text: &str) -> Result<EntityList>;
}
