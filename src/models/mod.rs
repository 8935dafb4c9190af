//! Wire types for the OpenAI-compatible serving API

pub mod chat;
pub mod common;
pub mod embeddings;

pub use chat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRequest,
    GenerationParams, ResponseMessage, Role,
};
pub use common::Usage;
pub use embeddings::{EmbeddingData, EmbeddingInput, EmbeddingRequest, EmbeddingResponse};
