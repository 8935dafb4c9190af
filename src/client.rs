//! Serving endpoint client
//!
//! Builds chat completion and embedding requests, dispatches them through a
//! [`Transport`], and extracts the primary result from the response.
//!
//! The credential and endpoint are passed into every call. The client holds
//! nothing but its transport, so one instance can serve any number of
//! endpoints and concurrent callers.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::EndpointConfig,
    credential::Credential,
    error::{InferenceError, InferenceResult},
    models::{
        ChatCompletionRequest, ChatCompletionResponse, ChatRequest, EmbeddingInput,
        EmbeddingRequest, EmbeddingResponse, GenerationParams,
    },
    prompt::ChatPromptTemplate,
    transport::{headers::build_default_headers, HttpTransport, Transport},
};

/// Client for OpenAI-compatible serving endpoints
#[derive(Debug, Clone, Default)]
pub struct InferenceClient<T = HttpTransport> {
    transport: T,
}

impl InferenceClient<HttpTransport> {
    /// Create a client backed by a default HTTP transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(client: reqwest::Client) -> Self {
        Self::with_transport(HttpTransport::with_client(client))
    }
}

impl<T: Transport> InferenceClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a chat completion request and return the full response
    ///
    /// The returned response is guaranteed to contain at least one choice.
    #[instrument(
        skip(self, config, credential, request),
        fields(model = %config.model_id(), messages = request.messages().len())
    )]
    pub async fn chat_completion(
        &self,
        config: &EndpointConfig,
        credential: &Credential,
        request: &ChatRequest,
    ) -> InferenceResult<ChatCompletionResponse> {
        credential.ensure_present()?;
        request.validate()?;

        let body = ChatCompletionRequest::new(config, request);
        let response: ChatCompletionResponse =
            self.post(&config.chat_url(), credential, &body).await?;

        if response.choices.is_empty() {
            error!("Chat completion response contained no choices");
            return Err(InferenceError::MalformedResponse(
                "response has no choices".to_string(),
            ));
        }

        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "Chat completion usage"
            );
        }

        Ok(response)
    }

    /// Send a chat completion request and return the first choice's content
    pub async fn chat_complete(
        &self,
        config: &EndpointConfig,
        credential: &Credential,
        request: &ChatRequest,
    ) -> InferenceResult<String> {
        let response = self.chat_completion(config, credential, request).await?;
        let content = response.first_content()?;
        info!(chars = content.len(), "Chat completion succeeded");
        Ok(content.to_string())
    }

    /// Embed one string or a sequence of strings
    ///
    /// Returns one vector per input element, in input order.
    #[instrument(skip(self, config, credential, input), fields(model = %config.model_id()))]
    pub async fn embed(
        &self,
        config: &EndpointConfig,
        credential: &Credential,
        input: impl Into<EmbeddingInput> + Send,
    ) -> InferenceResult<Vec<Vec<f64>>> {
        credential.ensure_present()?;

        let input = input.into();
        if input.is_empty() {
            return Err(InferenceError::invalid_request(
                "embedding input must contain at least one string",
            ));
        }

        let body = EmbeddingRequest::new(config, &input);
        let response: EmbeddingResponse =
            self.post(&config.embeddings_url(), credential, &body).await?;

        let vectors = response.into_vectors(input.len())?;
        info!(
            count = vectors.len(),
            dimensions = vectors.first().map(Vec::len).unwrap_or(0),
            "Embedding succeeded"
        );
        Ok(vectors)
    }

    /// Render a prompt template and return the completion as a string
    pub async fn complete_prompt(
        &self,
        config: &EndpointConfig,
        credential: &Credential,
        template: &ChatPromptTemplate,
        variables: &HashMap<String, String>,
        params: GenerationParams,
    ) -> InferenceResult<String> {
        credential.ensure_present()?;

        let request = template.render(variables)?.with_params(params);
        self.chat_complete(config, credential, &request).await
    }

    /// Serialize, POST and decode one request
    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        credential: &Credential,
        body: &B,
    ) -> InferenceResult<R> {
        let headers = build_default_headers(credential)?;
        let payload = serde_json::to_vec(body).map_err(|e| {
            InferenceError::invalid_request(format!("Failed to serialize request: {}", e))
        })?;

        debug!(url = %url, body_len = payload.len(), "Dispatching inference request");

        let response = self.transport.post_json(url, headers, payload).await?;

        if !response.is_success() {
            error!(status = response.status, body = %response.body, "Serving endpoint request failed");
            return Err(InferenceError::from_status(response.status, &response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            error!(error = %e, "Failed to parse serving endpoint response");
            InferenceError::MalformedResponse(format!("Failed to parse response: {}", e))
        })
    }
}
