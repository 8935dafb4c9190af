//! serving-client - OpenAI-compatible client for model serving endpoints
//!
//! This library builds chat completion and embedding requests for hosted
//! serving endpoints, sends them with a bearer credential, and extracts the
//! primary result from the response. The credential and endpoint are
//! supplied by the caller on every call.

pub mod client;
pub mod config;
pub mod credential;
pub mod curl;
pub mod error;
pub mod models;
pub mod prompt;
pub mod transport;

pub use crate::client::InferenceClient;
pub use crate::config::{EndpointConfig, Route, Settings};
pub use crate::credential::Credential;
pub use crate::curl::CurlCommand;
pub use crate::error::{InferenceError, InferenceResult};
pub use crate::models::{ChatMessage, ChatRequest, EmbeddingInput, GenerationParams, Role};
pub use crate::prompt::ChatPromptTemplate;
pub use crate::transport::{HttpTransport, Transport, TransportResponse};
