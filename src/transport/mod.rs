//! Transport layer
//!
//! Defines the seam between request building and the network so the client
//! can be exercised against a recording transport or a mock server.

pub mod headers;
pub mod http;

use async_trait::async_trait;
use reqwest::header::HeaderMap;

use crate::error::InferenceResult;

pub use self::http::HttpTransport;

/// Raw upstream response: status code plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait defining how a serialized request reaches the endpoint
///
/// Implementations perform exactly one POST per call. They report non-2xx
/// statuses as a normal [`TransportResponse`] and only return an error when
/// no response was received at all.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `url`
    async fn post_json(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> InferenceResult<TransportResponse>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::{RecordedRequest, RecordingTransport};

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::header::HeaderMap;

    use super::{Transport, TransportResponse};
    use crate::error::{InferenceError, InferenceResult};

    /// A request captured by [`RecordingTransport`]
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub headers: HeaderMap,
        pub body: Vec<u8>,
    }

    impl RecordedRequest {
        /// Body decoded as JSON
        pub fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
        }
    }

    /// In-memory transport returning canned responses in order
    ///
    /// Once the queue is exhausted every further call fails with a
    /// service-unavailable error.
    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        responses: Mutex<VecDeque<InferenceResult<TransportResponse>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a response with the given status and body
        pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
            self.push(Ok(TransportResponse::new(status, body)))
        }

        /// Queue a JSON response
        pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
            self.respond(status, body.to_string())
        }

        /// Queue a transport-level failure
        pub fn fail(self, error: InferenceError) -> Self {
            self.push(Err(error))
        }

        fn push(self, response: InferenceResult<TransportResponse>) -> Self {
            self.responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push_back(response);
            self
        }

        /// All requests seen so far
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post_json(
            &self,
            url: &str,
            headers: HeaderMap,
            body: Vec<u8>,
        ) -> InferenceResult<TransportResponse> {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(RecordedRequest {
                    url: url.to_string(),
                    headers,
                    body,
                });

            self.responses
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
                .unwrap_or_else(|| {
                    Err(InferenceError::service_unavailable(
                        "no canned response left",
                    ))
                })
        }
    }
}
