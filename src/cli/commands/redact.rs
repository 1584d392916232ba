//! Redact command implementation
//!
//! Reads a JSONL dataset, redacts the text field of every record batch by
//! batch, and writes the records back out. Output is written only after
//! every batch succeeded.

use crate::adapters::jsonl::{apply_documents, documents_from_records, read_records, write_records};
use crate::config::load_config;
use crate::domain::{CuratorError, DocumentBatch};
use crate::pii::{LlmPiiModifier, RedactionReport};
use clap::Args;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Input JSONL file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSONL file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the record field holding the text
    #[arg(long, default_value = "text")]
    pub text_field: String,

    /// Documents per batch
    #[arg(long, default_value = "64")]
    pub batch_size: NonZeroUsize,

    /// Detect entities only; write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Write the redaction report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting redact command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration validation failed");
                eprintln!("Configuration validation failed: {e}");
                return Ok(2);
            }
        };

        let dry_run = self.dry_run || config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no output will be written");
            println!("🔍 DRY RUN MODE - Entities are detected, no output is written");
            println!();
        }

        let modifier = match LlmPiiModifier::new(config.pii) {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create PII modifier");
                eprintln!("Failed to initialize redaction: {e}");
                return Ok(2);
            }
        };

        let mut records = match read_records(&self.input) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read input");
                eprintln!("Failed to read input: {e}");
                return Ok(5);
            }
        };
        let dataset = documents_from_records(&records, &self.text_field)?;

        let mut report = RedactionReport::new(modifier.config().model(), dry_run);
        for warning in modifier.warnings() {
            report.add_warning(warning.clone());
        }

        println!(
            "🚀 Processing {} documents in batches of {}...",
            dataset.len(),
            self.batch_size
        );

        for chunk in dataset.documents().chunks(self.batch_size.get()) {
            if *shutdown_signal.borrow() {
                println!();
                println!("⚠️  Redaction interrupted. No output was written.");
                tracing::info!("Redaction interrupted by user signal");
                return Ok(130);
            }

            let batch = DocumentBatch::new(chunk.to_vec());
            let result = if dry_run {
                let start = std::time::Instant::now();
                modifier
                    .detect_batch(&batch)
                    .await
                    .map(|entities| (None, entities, start.elapsed().as_millis() as u64))
            } else {
                modifier
                    .redact_batch(&batch)
                    .await
                    .map(|outcome| (Some(outcome.batch), outcome.entities, outcome.duration_ms))
            };

            let (redacted, entities, duration_ms) = match result {
                Ok(r) => r,
                Err(e) => {
                    crate::log_error_with_context!(&e, "Redaction batch failed");
                    eprintln!("Redaction failed: {e}");
                    return Ok(exit_code_for(&e));
                }
            };

            report.add_batch(&entities, duration_ms);
            if let Some(redacted) = redacted {
                apply_documents(&mut records, &redacted, &self.text_field)?;
            }
        }

        if !dry_run {
            write_records(&self.output, &records)?;
            println!("✅ Wrote {} records to {}", records.len(), self.output.display());
        }

        println!();
        println!("{}", report.format_console());

        if let Some(path) = &self.report {
            report.write_to_file(path)?;
            println!("📄 Report written to {}", path.display());
        }

        Ok(0)
    }
}

/// Connection problems exit with 4, everything else with 5
fn exit_code_for(error: &CuratorError) -> i32 {
    match error {
        CuratorError::Inference(e) if e.is_connection_error() => 4,
        _ => 5,
    }
}
