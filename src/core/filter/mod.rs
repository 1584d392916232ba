//! Document filters
//!
//! A filter scores each document and decides from the score whether to keep
//! it. [`ScoreFilter`] applies a filter to a batch; filters are created by
//! name through a [`FilterRegistry`].

pub mod heuristics;
pub mod registry;

pub use heuristics::{NonAlphaNumericFilter, WordCountFilter};
pub use registry::{FilterConstructor, FilterRegistry};

use crate::domain::{Document, DocumentBatch};
use serde::{Deserialize, Serialize};

/// Score produced by a filter for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterScore {
    Single(f64),
    Multi(Vec<f64>),
}

impl FilterScore {
    /// The single score, or the first of several
    pub fn primary(&self) -> Option<f64> {
        match self {
            Self::Single(score) => Some(*score),
            Self::Multi(scores) => scores.first().copied(),
        }
    }
}

/// Scores documents and decides which to keep
pub trait DocumentFilter: Send + Sync {
    /// Registry name of the filter
    fn name(&self) -> &str;

    /// Score one document's text
    fn score_document(&self, text: &str) -> FilterScore;

    /// Whether a document with this score is kept
    fn keep_document(&self, score: &FilterScore) -> bool;
}

/// Applies a [`DocumentFilter`] to batches
pub struct ScoreFilter {
    filter: Box<dyn DocumentFilter>,
    invert: bool,
}

impl ScoreFilter {
    pub fn new(filter: Box<dyn DocumentFilter>) -> Self {
        Self {
            filter,
            invert: false,
        }
    }

    /// Keep the documents the filter would drop instead
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    pub fn name(&self) -> &str {
        self.filter.name()
    }

    /// Score every document, in batch order
    pub fn score_batch(&self, batch: &DocumentBatch) -> Vec<FilterScore> {
        batch
            .documents()
            .iter()
            .map(|doc| self.filter.score_document(&doc.text))
            .collect()
    }

    /// Kept documents, in their original order with their original indices
    pub fn apply(&self, batch: &DocumentBatch) -> DocumentBatch {
        let kept: Vec<Document> = batch
            .documents()
            .iter()
            .filter(|doc| {
                let score = self.filter.score_document(&doc.text);
                self.filter.keep_document(&score) != self.invert
            })
            .cloned()
            .collect();

        tracing::debug!(
            filter = self.filter.name(),
            input = batch.len(),
            kept = kept.len(),
            "Applied document filter"
        );

        DocumentBatch::new(kept)
    }
}
