//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the pii-curator configuration file.

use crate::config::load_config;
use crate::pii::ResolvedPiiConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let resolved = match ResolvedPiiConfig::resolve(&config.pii) {
            Ok(r) => {
                println!("✅ Configuration is valid");
                r
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let labels: Vec<&str> = resolved.labels().iter().map(|l| l.as_str()).collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Endpoint: {}", resolved.base_url());
        println!(
            "  API Key: {}",
            if resolved.api_key().is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Model: {}", resolved.model());
        println!(
            "  System Prompt: {}",
            if resolved.uses_default_prompt() {
                "built-in default"
            } else {
                "custom"
            }
        );
        println!("  Labels: {}", labels.join(", "));
        println!("  Language: {}", resolved.language());
        println!("  Concurrency: {:?}", resolved.concurrency());
        println!("  Dispatch Strategy: {:?}", resolved.dispatch_strategy());
        println!("  Structured Output: {:?}", resolved.structured_output());
        println!("  Timeout: {}s", resolved.timeout().as_secs());
        println!(
            "  Audit Log: {}",
            if resolved.audit().enabled {
                resolved.audit().log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );

        if !resolved.warnings().is_empty() {
            println!();
            println!("⚠️  Warnings:");
            for warning in resolved.warnings() {
                println!("  - {warning}");
            }
        }
        println!();

        Ok(0)
    }
}
