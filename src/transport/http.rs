//! reqwest-backed transport
//!
//! Sends one POST per call using the transport's default timeouts.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{debug, error, instrument};

use super::{Transport, TransportResponse};
use crate::error::InferenceResult;

/// HTTP transport over a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, headers, body), fields(url = %url, body_len = body.len()))]
    async fn post_json(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> InferenceResult<TransportResponse> {
        debug!(url = %url, "Sending request to serving endpoint");

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send request to serving endpoint");
                e
            })?;

        let status = response.status();
        debug!(url = %url, status = %status, "Received response from serving endpoint");

        let body = response.text().await?;
        Ok(TransportResponse::new(status.as_u16(), body))
    }
}
