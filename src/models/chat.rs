//! Chat completion request/response types.

use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;
use crate::error::{InferenceError, InferenceResult};
use crate::models::common::Usage;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Optional generation parameters sent alongside the messages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    /// Upper bound on generated tokens; must be positive.
    pub max_tokens: Option<u32>,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: Option<f32>,
}

impl GenerationParams {
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> InferenceResult<()> {
        if self.max_tokens == Some(0) {
            return Err(InferenceError::invalid_request(
                "max_tokens must be a positive integer",
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                return Err(InferenceError::invalid_request(format!(
                    "temperature must be within [0, 1], got {}",
                    t
                )));
            }
        }
        Ok(())
    }
}

/// Caller-facing chat request: ordered messages plus generation parameters.
///
/// The final message is conventionally from the user, but that is not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    messages: Vec<ChatMessage>,
    params: GenerationParams,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            params: GenerationParams::default(),
        }
    }

    /// Append a message.
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.params = self.params.max_tokens(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.params = self.params.temperature(temperature);
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Reject requests the endpoint would refuse anyway.
    pub fn validate(&self) -> InferenceResult<()> {
        if self.messages.is_empty() {
            return Err(InferenceError::invalid_request(
                "chat request must contain at least one message",
            ));
        }
        self.params.validate()
    }
}

/// Chat completion body as sent on the wire.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(config: &'a EndpointConfig, request: &'a ChatRequest) -> Self {
        Self {
            model: config.model_id(),
            messages: request.messages(),
            max_tokens: request.params.max_tokens,
            temperature: request.params.temperature,
        }
    }
}

/// Message inside a completion choice.
///
/// Fields are optional so a missing `content` surfaces as a malformed
/// response instead of a decode failure on an unrelated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: Option<u32>,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat completion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Content of the first choice's message.
    pub fn first_content(&self) -> InferenceResult<&str> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| InferenceError::MalformedResponse("response has no choices".into()))?;

        choice.message.content.as_deref().ok_or_else(|| {
            InferenceError::MalformedResponse("first choice has no message content".into())
        })
    }
}
