//! Embedding request/response types.

use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;
use crate::error::{InferenceError, InferenceResult};
use crate::models::common::Usage;

/// Embedding input (single or batch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Number of vectors the endpoint must return.
    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Batch(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        EmbeddingInput::Single(text.to_string())
    }
}

impl From<String> for EmbeddingInput {
    fn from(text: String) -> Self {
        EmbeddingInput::Single(text)
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(items: Vec<String>) -> Self {
        EmbeddingInput::Batch(items)
    }
}

impl From<Vec<&str>> for EmbeddingInput {
    fn from(items: Vec<&str>) -> Self {
        EmbeddingInput::Batch(items.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EmbeddingInput {
    fn from(items: &[&str]) -> Self {
        EmbeddingInput::Batch(items.iter().map(|s| s.to_string()).collect())
    }
}

/// Embedding body as sent on the wire.
#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub input: &'a EmbeddingInput,
    pub model: &'a str,
}

impl<'a> EmbeddingRequest<'a> {
    pub fn new(config: &'a EndpointConfig, input: &'a EmbeddingInput) -> Self {
        Self {
            input,
            model: config.model_id(),
        }
    }
}

/// Embedding object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    #[serde(default)]
    pub index: Option<usize>,
    pub embedding: Vec<f64>,
}

/// Embedding response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl EmbeddingResponse {
    /// Vectors aligned with the request's input order.
    ///
    /// Items are placed by their `index` when every item carries one,
    /// otherwise response order is kept. The vector count must match
    /// `expected`.
    pub fn into_vectors(self, expected: usize) -> InferenceResult<Vec<Vec<f64>>> {
        if self.data.len() != expected {
            return Err(InferenceError::MalformedResponse(format!(
                "expected {} embeddings, got {}",
                expected,
                self.data.len()
            )));
        }

        let indices: Option<Vec<usize>> = self.data.iter().map(|item| item.index).collect();
        let Some(indices) = indices else {
            return Ok(self.data.into_iter().map(|item| item.embedding).collect());
        };

        let mut slots: Vec<Option<Vec<f64>>> = vec![None; expected];
        for (index, item) in indices.into_iter().zip(self.data) {
            let slot = slots.get_mut(index).ok_or_else(|| {
                InferenceError::MalformedResponse(format!(
                    "embedding index {} out of range for {} inputs",
                    index, expected
                ))
            })?;
            if slot.replace(item.embedding).is_some() {
                return Err(InferenceError::MalformedResponse(format!(
                    "duplicate embedding index {}",
                    index
                )));
            }
        }

        // Count matches and no index repeats, so every slot is filled
        Ok(slots.into_iter().flatten().collect())
    }
}
