//! Error types for the serving client
//!
//! Every failure a call can produce maps onto one of four kinds. Errors are
//! returned to the caller unmodified; presentation is left to the caller.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by inference calls
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Missing, empty or rejected credential (HTTP 401/403)
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
    },

    /// Malformed payload or unknown model (HTTP 4xx other than auth)
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        status: Option<u16>,
    },

    /// Upstream failure (HTTP 5xx) or network error
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        message: String,
        status: Option<u16>,
    },

    /// Response body does not match the expected schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl InferenceError {
    /// Authentication error raised locally, before any request was sent
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status: None,
        }
    }

    /// Invalid request raised locally, before any request was sent
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            status: None,
        }
    }

    /// Service unavailable without an HTTP status (network failure)
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            status: None,
        }
    }

    /// Classify a non-success HTTP response
    ///
    /// 401/403 are authentication failures, any other 4xx is an invalid
    /// request, and everything else (5xx, unexpected redirects) means the
    /// service could not serve the call.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = upstream_message(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                format!("HTTP {}: {}", status, body.trim())
            }
        });
        match status {
            401 | 403 => Self::Authentication {
                message,
                status: Some(status),
            },
            400..=499 => Self::InvalidRequest {
                message,
                status: Some(status),
            },
            _ => Self::ServiceUnavailable {
                message,
                status: Some(status),
            },
        }
    }

    /// Upstream HTTP status, when the error came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::InvalidRequest { status, .. }
            | Self::ServiceUnavailable { status, .. } => *status,
            Self::MalformedResponse(_) => None,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "AUTHENTICATION_ERROR",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        let message = match std::error::Error::source(&err) {
            Some(source) => format!("{}: {}", err, source),
            None => err.to_string(),
        };
        // A request that could not be built (e.g. unparsable URL) never left the caller
        if err.is_builder() {
            Self::invalid_request(message)
        } else {
            Self::service_unavailable(message)
        }
    }
}

/// OpenAI-style error envelope: `{"error": {"message": ...}}`
#[derive(Debug, Deserialize)]
struct OpenAIErrorEnvelope {
    error: OpenAIErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
}

/// Serving platform error shape: `{"error_code": ..., "message": ...}`
#[derive(Debug, Deserialize)]
struct PlatformError {
    error_code: Option<String>,
    message: String,
}

/// Pull a human-readable message out of an upstream error body
fn upstream_message(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<OpenAIErrorEnvelope>(body) {
        return Some(envelope.error.message);
    }

    let platform = serde_json::from_str::<PlatformError>(body).ok()?;
    Some(match platform.error_code {
        Some(code) => format!("{}: {}", code, platform.message),
        None => platform.message,
    })
}

/// Result type alias for convenience
pub type InferenceResult<T> = Result<T, InferenceError>;
