//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "pii-curator.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing pii-curator configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your endpoint and model", self.output);
                println!("  2. If the endpoint needs a key, set PII_CURATOR_PII_API_KEY");
                println!("  3. Validate configuration: pii-curator validate-config");
                println!(
                    "  4. Run redaction: pii-curator redact --input data.jsonl --output redacted.jsonl"
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# pii-curator Configuration File
# LLM-backed PII redaction for text datasets

[application]
log_level = "info"
dry_run = false

[pii]
base_url = "http://localhost:8000/v1"
model = "meta/llama-3.1-70b-instruct"
max_concurrent_requests = 8

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with every option documented
    fn generate_config_with_examples() -> String {
        r#"# pii-curator Configuration File
# LLM-backed PII redaction for text datasets
#
# Values of the form ${VAR} are replaced from the environment.
# Any value can also be overridden with PII_CURATOR_<SECTION>_<KEY>,
# for example PII_CURATOR_PII_BASE_URL.

[application]
# trace | debug | info | warn | error
log_level = "info"
# Detect entities and report them without writing output
dry_run = false

[pii]
# OpenAI-compatible chat-completions endpoint (without /chat/completions)
base_url = "http://localhost:8000/v1"
# Bearer credential; prefer PII_CURATOR_PII_API_KEY
# api_key = "${PII_CURATOR_PII_API_KEY}"
model = "meta/llama-3.1-70b-instruct"

# Labels the model may report; placeholders are the upper-cased label
pii_labels = [
    "medical_record_number",
    "location",
    "address",
    "ssn",
    "date_of_birth",
    "date_time",
    "name",
    "email",
    "customer_id",
    "employee_id",
    "phone_number",
    "ip_address",
    "credit_card_number",
    "user_name",
    "device_identifier",
    "bank_routing_number",
    "company_name",
    "unique_identifier",
    "biometric_identifier",
    "account_number",
    "certificate_license_number",
    "license_plate",
    "vehicle_identifier",
    "api_key",
    "password",
    "health_plan_beneficiary_number",
    "national_id",
    "tax_id",
    "url",
    "swift_bic",
    "cvv",
    "pin",
]

# Language of the documents (the built-in prompt is written for English)
language = "en"

# Maximum requests in flight; omit to send the whole batch at once
max_concurrent_requests = 8

# slice_barrier | sliding_window
dispatch_strategy = "slice_barrier"

# nvext | response_format
structured_output = "nvext"

max_output_tokens = 4096
timeout_seconds = 120

# Per-model system prompts; models without one use the built-in prompt
# [pii.system_prompts]
# "my-org/custom-model" = "You are a PII detector..."

[pii.audit]
# Log SHA-256 hashes of every redacted value (JSON lines)
enabled = false
log_path = "./audit/redaction.log"

[logging]
# Write JSON logs to rotating local files
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
