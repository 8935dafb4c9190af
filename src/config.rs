//! Configuration for the serving client
//!
//! [`EndpointConfig`] is the immutable value object a call targets.
//! [`Settings`] is loaded from environment variables by the CLI.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Default environment variable holding the bearer token
pub const DEFAULT_TOKEN_VAR: &str = "DATABRICKS_TOKEN";
/// Default chat model served by the endpoint
pub const DEFAULT_CHAT_MODEL: &str = "databricks-dbrx-instruct";
/// Default embedding model served by the endpoint
pub const DEFAULT_EMBEDDING_MODEL: &str = "databricks-gte-large-en";

/// URL layout exposed by a serving deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `{base}/chat/completions` and `{base}/embeddings`
    #[default]
    OpenAiCompatible,
    /// `{base}/{model}/invocations` for every capability
    Invocations,
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(Route::OpenAiCompatible),
            "invocations" => Ok(Route::Invocations),
            other => bail!("Unknown route '{}', expected 'openai' or 'invocations'", other),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::OpenAiCompatible => f.write_str("openai"),
            Route::Invocations => f.write_str("invocations"),
        }
    }
}

/// Target endpoint for a call: where to send it and which model serves it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
    model_id: String,
    route: Route,
}

impl EndpointConfig {
    /// Create a config using the OpenAI-compatible route
    pub fn new(base_url: impl Into<String>, model_id: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            route: Route::default(),
        }
    }

    /// Same endpoint, different route
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// URL for chat completion requests
    pub fn chat_url(&self) -> String {
        self.capability_url("chat/completions")
    }

    /// URL for embedding requests
    pub fn embeddings_url(&self) -> String {
        self.capability_url("embeddings")
    }

    fn capability_url(&self, suffix: &str) -> String {
        match self.route {
            Route::OpenAiCompatible => format!("{}/{}", self.base_url, suffix),
            Route::Invocations => format!("{}/{}/invocations", self.base_url, self.model_id),
        }
    }
}

/// CLI settings loaded from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Serving endpoints base URL
    pub base_url: String,
    /// Environment variable the token is read from
    pub token_var: String,
    /// Model used for chat and prompt commands
    pub chat_model: String,
    /// Model used for the embed command
    pub embedding_model: String,
    /// URL layout of the deployment
    pub route: Route,
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// `SERVING_BASE_URL` wins over `DATABRICKS_HOST`; one of them must be set.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(None)
    }

    /// Load settings, taking the base URL from `base_url` when given
    pub fn from_env_with(base_url: Option<String>) -> Result<Self> {
        let base_url = match base_url.map(Ok).unwrap_or_else(|| env::var("SERVING_BASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("DATABRICKS_HOST")
                    .context("SERVING_BASE_URL or DATABRICKS_HOST must be set")?;
                format!("{}/serving-endpoints", host.trim_end_matches('/'))
            }
        };

        Ok(Self {
            base_url,
            token_var: env::var("SERVING_TOKEN_VAR")
                .unwrap_or_else(|_| DEFAULT_TOKEN_VAR.to_string()),
            chat_model: env::var("SERVING_CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: env::var("SERVING_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            route: env::var("SERVING_ROUTE")
                .unwrap_or_else(|_| "openai".to_string())
                .parse()
                .context("Invalid SERVING_ROUTE")?,
        })
    }

    /// Endpoint config for chat calls
    pub fn chat_endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(&self.base_url, &self.chat_model).with_route(self.route)
    }

    /// Endpoint config for embedding calls
    pub fn embedding_endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(&self.base_url, &self.embedding_model).with_route(self.route)
    }
}
