//! Filter registry
//!
//! Maps filter names to constructors that build a filter from TOML
//! parameters. Filters are registered explicitly; nothing is looked up by
//! module path at runtime.

use super::heuristics::{NonAlphaNumericFilter, WordCountFilter};
use super::DocumentFilter;
use crate::domain::{CuratorError, Result};
use std::collections::BTreeMap;

/// Builds a filter from its parameters
pub type FilterConstructor =
    Box<dyn Fn(&toml::Table) -> Result<Box<dyn DocumentFilter>> + Send + Sync>;

/// Name-to-constructor registry of document filters
#[derive(Default)]
pub struct FilterRegistry {
    constructors: BTreeMap<String, FilterConstructor>,
}

impl FilterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in heuristic filters
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_fn(WordCountFilter::NAME, |params| {
            Ok(Box::new(WordCountFilter::from_params(params)?))
        });
        registry.register_fn(NonAlphaNumericFilter::NAME, |params| {
            Ok(Box::new(NonAlphaNumericFilter::from_params(params)?))
        });
        registry
    }

    /// Register a constructor under a name, replacing any existing one
    pub fn register_fn<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&toml::Table) -> Result<Box<dyn DocumentFilter>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self
            .constructors
            .insert(name.clone(), Box::new(constructor))
            .is_some()
        {
            tracing::debug!(filter = %name, "Replaced registered filter");
        }
    }

    /// Whether a filter is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Build the filter registered under `name`
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Filter`] for an unknown name or bad parameters.
    pub fn create(&self, name: &str, params: &toml::Table) -> Result<Box<dyn DocumentFilter>> {
        let constructor = self.constructors.get(name).ok_or_else(|| {
            CuratorError::Filter(format!(
                "Unknown filter '{name}'. Available: {}",
                self.names().join(", ")
            ))
        })?;
        constructor(params)
    }
}
