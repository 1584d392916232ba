//! Chat-completions wire models and entity parsing

use crate::domain::{CandidateEntity, EntityList};
use crate::pii::EntityValidator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvext: Option<NvExt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// NIM/vLLM guided decoding extension
#[derive(Debug, Clone, Serialize)]
pub struct NvExt {
    pub guided_json: Value,
}

/// OpenAI structured-output request
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl ResponseFormat {
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self {
            kind: "json_schema".to_string(),
            json_schema: JsonSchemaFormat {
                name: name.into(),
                schema,
                strict: true,
            },
        }
    }
}

/// Chat-completions response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Parse model output into validated entities
///
/// Accepts a bare JSON array of entities or an object with an `entities`
/// array. Anything else (missing content, invalid JSON, null, a scalar) yields
/// an empty list. Array items that do not deserialize as entities, or fail
/// validation against `source_text`, are dropped individually.
pub fn parse_entities(
    content: Option<&str>,
    source_text: &str,
    validator: &EntityValidator,
) -> EntityList {
    let Some(content) = content else {
        tracing::debug!("Model returned no content");
        return Vec::new();
    };

    let parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Model output is not valid JSON; treating as no entities");
            return Vec::new();
        }
    };

    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("entities") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let candidates = items.into_iter().filter_map(|item| {
        serde_json::from_value::<CandidateEntity>(item)
            .map_err(|e| tracing::debug!(error = %e, "Skipping malformed entity"))
            .ok()
    });

    validator.validate_all(candidates, source_text)
}
