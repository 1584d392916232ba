//! Filter command implementation
//!
//! Applies one registered document filter to a JSONL dataset and writes the
//! kept records, in their original order.

use crate::adapters::jsonl::{documents_from_records, read_records, write_records};
use crate::core::filter::{FilterRegistry, ScoreFilter};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the filter command
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Input JSONL file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSONL file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the record field holding the text
    #[arg(long, default_value = "text")]
    pub text_field: String,

    /// Registered filter name (e.g. word_count, non_alphanumeric)
    #[arg(short, long)]
    pub filter: String,

    /// Filter parameter as key=value; repeatable
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Keep the documents the filter would drop
    #[arg(long)]
    pub invert: bool,
}

impl FilterArgs {
    /// Execute the filter command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(
            filter = %self.filter,
            input = %self.input.display(),
            "Starting filter command"
        );

        let params = match parse_params(&self.params) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let registry = FilterRegistry::with_builtins();
        let filter = match registry.create(&self.filter, &params) {
            Ok(f) => f,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to create filter");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        let mut filter = ScoreFilter::new(filter);
        if self.invert {
            filter = filter.inverted();
        }

        let records = match read_records(&self.input) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                eprintln!("Failed to read input: {e}");
                return Ok(5);
            }
        };
        let dataset = documents_from_records(&records, &self.text_field)?;
        let kept = filter.apply(&dataset);

        let kept_records: Vec<_> = kept
            .indices()
            .into_iter()
            .filter_map(|index| records.get(index as usize).cloned())
            .collect();
        write_records(&self.output, &kept_records)?;

        println!("📊 Filter Summary:");
        println!("  Filter: {}", filter.name());
        println!("  Input: {}", dataset.len());
        println!("  Kept: {}", kept_records.len());
        println!("  Dropped: {}", dataset.len() - kept_records.len());
        println!();
        println!("✅ Wrote {} records to {}", kept_records.len(), self.output.display());

        Ok(0)
    }
}

/// Parse `key=value` pairs into a parameter table
///
/// Values are read as TOML (`3`, `0.5`, `true`, `"x"`); anything that does
/// not parse is kept as a plain string.
fn parse_params(pairs: &[String]) -> Result<toml::Table, String> {
    let mut table = toml::Table::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid parameter '{pair}'. Expected KEY=VALUE"))?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(format!("Invalid parameter '{pair}'. Key cannot be empty"));
        }

        let parsed = format!("v = {value}")
            .parse::<toml::Table>()
            .ok()
            .and_then(|mut t| t.remove("v"))
            .unwrap_or_else(|| toml::Value::String(value.to_string()));
        table.insert(key.to_string(), parsed);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_params_typed_values() {
        let table = parse_params(&pairs(&["min_words=3", "ratio = 0.5", "flag=true"])).unwrap();
        assert_eq!(table["min_words"], toml::Value::Integer(3));
        assert_eq!(table["ratio"], toml::Value::Float(0.5));
        assert_eq!(table["flag"], toml::Value::Boolean(true));
    }

    #[test]
    fn test_parse_params_bare_string() {
        let table = parse_params(&pairs(&["lang=en"])).unwrap();
        assert_eq!(table["lang"], toml::Value::String("en".to_string()));
    }

    #[test]
    fn test_parse_params_rejects_missing_separator() {
        assert!(parse_params(&pairs(&["min_words"])).is_err());
        assert!(parse_params(&pairs(&["=3"])).is_err());
    }
}
