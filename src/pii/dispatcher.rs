//! Bounded batch dispatch
//!
//! Issues one inference request per text while keeping at most `C` requests
//! in flight. Results always come back positionally aligned with the input.
//!
//! The default [`DispatchStrategy::SliceBarrier`] partitions the batch into
//! consecutive slices of `C` and waits for a whole slice before starting the
//! next. One slow request therefore holds back its slice, but the number of
//! in-flight requests is exactly observable. [`DispatchStrategy::SlidingWindow`]
//! keeps the same ceiling and starts a new request as soon as any finishes.
//!
//! Requests are joined futures on the caller's task, never spawned, so a
//! failed or cancelled batch leaves nothing running in the background.

use crate::adapters::llm::EntityInference;
use crate::config::DispatchStrategy;
use crate::domain::{EntityList, Result};
use futures::future::try_join_all;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Ceiling on concurrently in-flight requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConcurrencyLimit {
    /// Every request in the batch may be in flight at once
    #[default]
    Unbounded,
    /// At most this many requests in flight
    Bounded(NonZeroUsize),
}

impl ConcurrencyLimit {
    /// Build from the configuration value; `None` is unbounded
    ///
    /// # Errors
    ///
    /// Returns an error for `Some(0)`.
    pub fn from_config(value: Option<usize>) -> std::result::Result<Self, String> {
        match value {
            None => Ok(Self::Unbounded),
            Some(n) => NonZeroUsize::new(n)
                .map(Self::Bounded)
                .ok_or_else(|| "max_concurrent_requests must be a positive integer".to_string()),
        }
    }

    /// Effective slice width for a batch of `batch_len` texts
    ///
    /// Never zero, so an empty batch still chunks cleanly.
    pub fn width(&self, batch_len: usize) -> usize {
        match self {
            Self::Unbounded => batch_len.max(1),
            Self::Bounded(n) => n.get(),
        }
    }
}

/// Dispatches a batch of texts to an inference client under a ceiling
#[derive(Clone)]
pub struct Dispatcher {
    inference: Arc<dyn EntityInference>,
    limit: ConcurrencyLimit,
    strategy: DispatchStrategy,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(
        inference: Arc<dyn EntityInference>,
        limit: ConcurrencyLimit,
        strategy: DispatchStrategy,
    ) -> Self {
        Self {
            inference,
            limit,
            strategy,
        }
    }

    /// Concurrency ceiling in effect
    pub fn limit(&self) -> ConcurrencyLimit {
        self.limit
    }

    /// Scheduling strategy in effect
    pub fn strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    /// Run inference for every text, returning results in input order
    ///
    /// An empty input makes no requests.
    ///
    /// # Errors
    ///
    /// The first transport failure aborts the batch. No partial results are
    /// returned; outstanding requests of the failing slice are dropped.
    pub async fn dispatch(&self, texts: &[String]) -> Result<Vec<EntityList>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let width = self.limit.width(texts.len());
        tracing::debug!(
            total = texts.len(),
            width,
            strategy = ?self.strategy,
            "Dispatching inference requests"
        );

        match self.strategy {
            DispatchStrategy::SliceBarrier => self.dispatch_slices(texts, width).await,
            DispatchStrategy::SlidingWindow => self.dispatch_window(texts, width).await,
        }
    }

    async fn dispatch_slices(&self, texts: &[String], width: usize) -> Result<Vec<EntityList>> {
        let total = texts.len();
        let slice_count = total.div_ceil(width);
        let mut results = Vec::with_capacity(total);

        for (slice_index, slice) in texts.chunks(width).enumerate() {
            let requests: Vec<_> = slice.iter().map(|text| self.inference.infer(text)).collect();
            let slice_results = try_join_all(requests).await.map_err(|e| {
                tracing::error!(
                    slice = slice_index + 1,
                    slices = slice_count,
                    error = %e,
                    "Inference slice failed"
                );
                e
            })?;
            results.extend(slice_results);

            tracing::debug!(
                slice = slice_index + 1,
                slices = slice_count,
                completed = results.len(),
                total,
                "Inference slice complete"
            );
        }

        Ok(results)
    }

    async fn dispatch_window(&self, texts: &[String], width: usize) -> Result<Vec<EntityList>> {
        let requests: Vec<_> = texts.iter().map(|text| self.inference.infer(text)).collect();
        stream::iter(requests)
            .buffered(width)
            .try_collect()
            .await
    }
}
