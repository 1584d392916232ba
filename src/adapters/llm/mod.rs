//! LLM inference adapter
//!
//! An OpenAI-compatible chat-completions client behind the [`EntityInference`]
//! trait. Any endpoint that accepts `POST {base_url}/chat/completions` with a
//! schema constraint (NIM, vLLM, OpenAI) can serve as the detector.

pub mod client;
pub mod models;
pub mod traits;

pub use client::ChatCompletionsClient;
pub use models::parse_entities;
pub use traits::EntityInference;
