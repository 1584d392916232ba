//! OpenAI-compatible chat-completions client
//!
//! One request per text: the resolved system prompt, the text as the user
//! message, and the entity schema as a structured-output constraint. The
//! returned content is parsed and validated before it leaves this module.

use super::models::{
    parse_entities, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, NvExt,
    ResponseFormat,
};
use super::traits::EntityInference;
use crate::config::prompts::{entity_json_schema, wrapped_entity_json_schema, SCHEMA_NAME};
use crate::config::StructuredOutputMode;
use crate::domain::{CuratorError, EntityList, InferenceError, Result};
use crate::pii::{EntityValidator, ResolvedPiiConfig};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Chat-completions inference client
///
/// # Example
///
/// ```no_run
/// use pii_curator::adapters::llm::{ChatCompletionsClient, EntityInference};
/// use pii_curator::config::PiiConfig;
/// use pii_curator::pii::ResolvedPiiConfig;
///
/// # async fn example() -> pii_curator::domain::Result<()> {
/// let config = ResolvedPiiConfig::resolve(&PiiConfig::new("http://0.0.0.0:8000/v1"))?;
/// let client = ChatCompletionsClient::new(&config)?;
///
/// let entities = client.infer("Sarah and Ryan went out to play").await?;
/// # Ok(())
/// # }
/// ```
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    auth_header: Option<String>,
    model: String,
    system_prompt: String,
    max_output_tokens: u32,
    structured_output: StructuredOutputMode,
    schema: Value,
    validator: EntityValidator,
}

impl ChatCompletionsClient {
    /// Build a client from a resolved configuration
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &ResolvedPiiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                CuratorError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let schema = match config.structured_output() {
            StructuredOutputMode::Nvext => entity_json_schema(config.labels()),
            StructuredOutputMode::ResponseFormat => wrapped_entity_json_schema(config.labels()),
        };

        let auth_header = config.api_key().and_then(|key| {
            let key: &str = key.expose_secret().as_ref();
            (!key.trim().is_empty()).then(|| format!("Bearer {key}"))
        });

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url()),
            auth_header,
            model: config.model().to_string(),
            system_prompt: config.system_prompt().to_string(),
            max_output_tokens: config.max_output_tokens(),
            structured_output: config.structured_output(),
            schema,
            validator: EntityValidator::new(config.labels().to_vec()),
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, text: &str) -> ChatCompletionRequest {
        let (nvext, response_format) = match self.structured_output {
            StructuredOutputMode::Nvext => (
                Some(NvExt {
                    guided_json: self.schema.clone(),
                }),
                None,
            ),
            StructuredOutputMode::ResponseFormat => (
                None,
                Some(ResponseFormat::json_schema(SCHEMA_NAME, self.schema.clone())),
            ),
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(text),
            ],
            max_tokens: self.max_output_tokens,
            stream: false,
            nvext,
            response_format,
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout(e.to_string())
    } else {
        InferenceError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl EntityInference for ChatCompletionsClient {
    async fn infer(&self, text: &str) -> Result<EntityList> {
        let text = text.trim();
        let request = self.build_request(text);

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(auth) = &self.auth_header {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Inference request rejected");
            return Err(InferenceError::from_status(status.as_u16(), body).into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(e.to_string())
            } else {
                InferenceError::InvalidResponse(e.to_string())
            }
        })?;

        let entities = parse_entities(completion.first_content(), text, &self.validator);
        tracing::trace!(entities = entities.len(), "Inference complete");

        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, PiiConfig};
    use mockito::Matcher;
    use serde_json::json;

    fn completion(content: &str) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }

    fn client_for(
        server: &mockito::ServerGuard,
        configure: impl FnOnce(&mut PiiConfig),
    ) -> ChatCompletionsClient {
        let mut config = PiiConfig::new(format!("{}/v1", server.url()));
        config.pii_labels = vec!["name".to_string(), "email".to_string()];
        configure(&mut config);
        let resolved = ResolvedPiiConfig::resolve(&config).unwrap();
        ChatCompletionsClient::new(&resolved).unwrap()
    }

    #[tokio::test]
    async fn test_infer_returns_validated_entities() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer nvapi-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "meta/llama-3.1-70b-instruct",
                "stream": false,
                "max_tokens": 4096,
                "messages": [
                    {"role": "system"},
                    {"role": "user", "content": "Sarah and Ryan went out to play"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion(
                r#"[{"entity_type":"name","text":"Sarah"},{"entity_type":"name","text":"Jensen"}]"#,
            ))
            .create_async()
            .await;

        let client = client_for(&server, |c| {
            c.api_key = Some(secret_string("nvapi-test".to_string()));
        });

        // Surrounding whitespace is stripped before sending
        let entities = client
            .infer("  Sarah and Ryan went out to play\n")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text(), "Sarah");
        assert_eq!(entities[0].label().as_str(), "name");
    }

    #[tokio::test]
    async fn test_nvext_carries_label_schema() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "nvext": {"guided_json": {
                    "type": "array",
                    "items": {"properties": {"entity_type": {"enum": ["name", "email"]}}}
                }}
            })))
            .with_status(200)
            .with_body(completion("[]"))
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        assert!(client.infer("nothing here").await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_response_format_mode() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {"name": "pii_entities", "strict": true}
                }
            })))
            .with_status(200)
            .with_body(completion(
                r#"{"entities":[{"entity_type":"email","text":"ryan@example.com"}]}"#,
            ))
            .create_async()
            .await;

        let client = client_for(&server, |c| {
            c.structured_output = StructuredOutputMode::ResponseFormat;
        });

        let entities = client.infer("mail ryan@example.com").await.unwrap();
        mock.assert_async().await;
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label().as_str(), "email");
    }

    #[tokio::test]
    async fn test_malformed_content_is_empty_not_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(completion("I found Sarah, who is a name."))
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        assert!(client.infer("Sarah").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_inference_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        let err = client.infer("Sarah").await.unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Inference(InferenceError::ServerError { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        let err = client.infer("Sarah").await.unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Inference(InferenceError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(completion("[]"))
            .create_async()
            .await;

        let client = client_for(&server, |_| {});
        client.infer("text").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let config = ResolvedPiiConfig::resolve(&PiiConfig::new("http://127.0.0.1:1/v1")).unwrap();
        let client = ChatCompletionsClient::new(&config).unwrap();

        let err = client.infer("text").await.unwrap_err();
        assert!(matches!(
            err,
            CuratorError::Inference(InferenceError::ConnectionFailed(_))
        ));
    }
}
