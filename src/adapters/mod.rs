//! External system integrations for pii-curator.
//!
//! - [`llm`] - OpenAI-compatible inference endpoint (entity detection)
//! - [`jsonl`] - JSON Lines datasets read and written by the CLI
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the pipeline can be
//! tested with mock implementations. The inference endpoint sits behind
//! [`llm::EntityInference`]:
//!
//! ```rust,no_run
//! use pii_curator::adapters::llm::{ChatCompletionsClient, EntityInference};
//! use pii_curator::config::{secret_string, PiiConfig};
//! use pii_curator::pii::ResolvedPiiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = PiiConfig::new("https://integrate.api.nvidia.com/v1");
//! config.api_key = Some(secret_string("nvapi-...".to_string()));
//!
//! let client = ChatCompletionsClient::new(&ResolvedPiiConfig::resolve(&config)?)?;
//! let entities = client.infer("Call Ryan at 555-0100").await?;
//! # Ok(())
//! # }
//! ```

pub mod jsonl;
pub mod llm;
