//! Document modifiers
//!
//! A modifier rewrites the text of every document in a batch while keeping
//! its length and order. [`Modify`] applies one modifier across the
//! partitions of a dataset, one partition at a time.

use crate::domain::{DocumentBatch, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Rewrites document text batch by batch
#[async_trait]
pub trait DocumentModifier: Send + Sync {
    /// Modifier name for logs
    fn name(&self) -> &str;

    /// Produce a new batch aligned one-to-one with `batch`
    async fn modify_batch(&self, batch: &DocumentBatch) -> Result<DocumentBatch>;
}

/// Applies a modifier across dataset partitions
#[derive(Clone)]
pub struct Modify {
    modifier: Arc<dyn DocumentModifier>,
}

impl Modify {
    pub fn new(modifier: Arc<dyn DocumentModifier>) -> Self {
        Self { modifier }
    }

    /// Modify one partition
    ///
    /// Batch start and completion are logged by the modifier itself.
    pub async fn apply_batch(&self, batch: &DocumentBatch) -> Result<DocumentBatch> {
        self.modifier.modify_batch(batch).await
    }

    /// Modify every partition in order
    ///
    /// Stops at the first failing partition.
    pub async fn apply(&self, partitions: &[DocumentBatch]) -> Result<Vec<DocumentBatch>> {
        let mut modified = Vec::with_capacity(partitions.len());
        for (index, partition) in partitions.iter().enumerate() {
            tracing::debug!(
                modifier = self.modifier.name(),
                partition = index + 1,
                partitions = partitions.len(),
                "Modifying partition"
            );
            modified.push(self.apply_batch(partition).await?);
        }
        Ok(modified)
    }
}
