//! Heuristic quality filters

use super::{DocumentFilter, FilterScore};
use crate::domain::{CuratorError, Result};

/// Keeps documents whose word count is within `[min_words, max_words]`
#[derive(Debug, Clone)]
pub struct WordCountFilter {
    min_words: usize,
    max_words: usize,
}

impl WordCountFilter {
    pub const NAME: &'static str = "word_count";

    pub fn new(min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
        }
    }

    /// Build from registry parameters (`min_words`, `max_words`)
    pub fn from_params(params: &toml::Table) -> Result<Self> {
        let min_words = param_usize(params, "min_words", 50)?;
        let max_words = param_usize(params, "max_words", 100_000)?;
        if min_words > max_words {
            return Err(CuratorError::Filter(format!(
                "{}: min_words ({min_words}) exceeds max_words ({max_words})",
                Self::NAME
            )));
        }
        Ok(Self::new(min_words, max_words))
    }
}

impl DocumentFilter for WordCountFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score_document(&self, text: &str) -> FilterScore {
        FilterScore::Single(text.split_whitespace().count() as f64)
    }

    fn keep_document(&self, score: &FilterScore) -> bool {
        score
            .primary()
            .is_some_and(|words| words >= self.min_words as f64 && words <= self.max_words as f64)
    }
}

/// Drops documents dominated by characters that are not letters or digits
///
/// The score is the share of non-alphanumeric characters (whitespace
/// included). Empty text scores 1.0.
#[derive(Debug, Clone)]
pub struct NonAlphaNumericFilter {
    max_ratio: f64,
}

impl NonAlphaNumericFilter {
    pub const NAME: &'static str = "non_alphanumeric";

    pub fn new(max_ratio: f64) -> Self {
        Self { max_ratio }
    }

    /// Build from registry parameters (`max_non_alpha_numeric_to_text_ratio`)
    pub fn from_params(params: &toml::Table) -> Result<Self> {
        let max_ratio = param_f64(params, "max_non_alpha_numeric_to_text_ratio", 0.25)?;
        if !(0.0..=1.0).contains(&max_ratio) {
            return Err(CuratorError::Filter(format!(
                "{}: ratio must be between 0 and 1, got {max_ratio}",
                Self::NAME
            )));
        }
        Ok(Self::new(max_ratio))
    }
}

impl DocumentFilter for NonAlphaNumericFilter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn score_document(&self, text: &str) -> FilterScore {
        let total = text.chars().count();
        if total == 0 {
            return FilterScore::Single(1.0);
        }
        let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
        FilterScore::Single((total - alnum) as f64 / total as f64)
    }

    fn keep_document(&self, score: &FilterScore) -> bool {
        score.primary().is_some_and(|ratio| ratio <= self.max_ratio)
    }
}

fn param_usize(params: &toml::Table, key: &str, default: usize) -> Result<usize> {
    match params.get(key) {
        None => Ok(default),
        Some(toml::Value::Integer(n)) if *n >= 0 => Ok(*n as usize),
        Some(other) => Err(CuratorError::Filter(format!(
            "Parameter '{key}' must be a non-negative integer, got {other}"
        ))),
    }
}

fn param_f64(params: &toml::Table, key: &str, default: f64) -> Result<f64> {
    match params.get(key) {
        None => Ok(default),
        Some(toml::Value::Float(x)) => Ok(*x),
        Some(toml::Value::Integer(n)) => Ok(*n as f64),
        Some(other) => Err(CuratorError::Filter(format!(
            "Parameter '{key}' must be a number, got {other}"
        ))),
    }
}
