//! Configuration management for pii-curator.
//!
//! TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PII_CURATOR_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [pii]
//! base_url = "http://0.0.0.0:8000/v1"
//! api_key = "${NIM_API_KEY}"
//! model = "meta/llama-3.1-70b-instruct"
//! pii_labels = ["name", "email", "phone_number"]
//! language = "en"
//! max_concurrent_requests = 10
//!
//! [pii.system_prompts]
//! "my-org/custom-model" = "You are an expert redactor..."
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii_curator::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii-curator.toml")?;
//! println!("Model: {}", config.pii.model);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod prompts;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AuditConfig, CuratorConfig, DispatchStrategy, LoggingConfig, PiiConfig,
    StructuredOutputMode,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
