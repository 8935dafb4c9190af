//! Common test utilities for serving-client
//!
//! Shared fixtures and helpers used across the integration tests.

#![allow(dead_code)]

use serving_client::{
    ChatMessage, ChatRequest, Credential, EndpointConfig, InferenceClient, Route,
};

/// Test configuration constants
pub mod constants {
    /// Token the mock endpoint accepts
    pub const TEST_TOKEN: &str = "dapi-test-token";
    /// Chat model used in tests
    pub const TEST_CHAT_MODEL: &str = "databricks-dbrx-instruct";
    /// Embedding model used in tests
    pub const TEST_EMBEDDING_MODEL: &str = "databricks-gte-large-en";
    /// System prompt the sample scripts send
    pub const SYSTEM_PROMPT: &str = "You are an AI assistant";
    /// User prompt the sample scripts send
    pub const USER_PROMPT: &str = "Tell me about Large Language Models";
}

/// Credential accepted by the mocks
pub fn test_credential() -> Credential {
    Credential::new(constants::TEST_TOKEN)
}

/// Chat endpoint config pointing at a mock base URL
pub fn chat_config(base_url: &str) -> EndpointConfig {
    EndpointConfig::new(base_url, constants::TEST_CHAT_MODEL)
}

/// Chat endpoint config using the per-endpoint invocations route
pub fn invocations_config(base_url: &str) -> EndpointConfig {
    chat_config(base_url).with_route(Route::Invocations)
}

/// Embedding endpoint config pointing at a mock base URL
pub fn embedding_config(base_url: &str) -> EndpointConfig {
    EndpointConfig::new(base_url, constants::TEST_EMBEDDING_MODEL)
}

/// The request the sample scripts send
pub fn sample_chat_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(constants::SYSTEM_PROMPT),
        ChatMessage::user(constants::USER_PROMPT),
    ])
    .max_tokens(256)
}

/// Client over the real HTTP transport
pub fn http_client() -> InferenceClient {
    InferenceClient::new()
}
