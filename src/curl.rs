//! Equivalent raw HTTP invocation
//!
//! Renders the `curl` command and JSON body file that reproduce a client
//! call from a shell. The body is produced by the same serializer the client
//! uses, so both paths send byte-identical payloads. The secret itself never
//! appears in the output, only the name of the variable holding it.

use crate::{
    config::EndpointConfig,
    error::{InferenceError, InferenceResult},
    models::{ChatCompletionRequest, ChatRequest, EmbeddingInput, EmbeddingRequest},
};

/// A shell-invocable equivalent of one client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlCommand {
    url: String,
    body: String,
}

impl CurlCommand {
    /// Equivalent of `InferenceClient::chat_complete`
    pub fn chat(config: &EndpointConfig, request: &ChatRequest) -> InferenceResult<Self> {
        request.validate()?;
        let body = serialize(&ChatCompletionRequest::new(config, request))?;
        Ok(Self {
            url: config.chat_url(),
            body,
        })
    }

    /// Equivalent of `InferenceClient::embed`
    pub fn embeddings(config: &EndpointConfig, input: &EmbeddingInput) -> InferenceResult<Self> {
        if input.is_empty() {
            return Err(InferenceError::invalid_request(
                "embedding input must contain at least one string",
            ));
        }
        let body = serialize(&EmbeddingRequest::new(config, input))?;
        Ok(Self {
            url: config.embeddings_url(),
            body,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body, exactly as the client would send it
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render the command, reading the token from `$token_var` and the body
    /// from `body_file`
    pub fn render(&self, token_var: &str, body_file: &str) -> String {
        [
            "curl".to_string(),
            format!("  -u token:${}", token_var),
            "  -X POST".to_string(),
            "  -H \"Content-Type: application/json\"".to_string(),
            format!("  -d@{}", body_file),
            format!("  {}", self.url),
        ]
        .join(" \\\n")
    }
}

fn serialize<B: serde::Serialize>(body: &B) -> InferenceResult<String> {
    serde_json::to_string(body).map_err(|e| {
        InferenceError::invalid_request(format!("Failed to serialize request: {}", e))
    })
}
