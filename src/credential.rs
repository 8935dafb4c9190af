//! Bearer credential handling
//!
//! The token is resolved by the caller (usually from the environment) and
//! passed into every call. It is kept in a [`SecretString`] so it never ends
//! up in `Debug` output or logs.

use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::error::{InferenceError, InferenceResult};

/// Opaque bearer token presented in the `Authorization` header
#[derive(Clone, Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// Wrap an already-resolved token
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Read the token from an environment variable
    ///
    /// An unset variable yields an empty credential rather than an error, so
    /// that the first call reports it as an authentication failure.
    pub fn from_env(var: &str) -> Self {
        match env::var(var) {
            Ok(token) => Self::new(token),
            Err(_) => {
                warn!(var = %var, "Credential environment variable is not set");
                Self::new(String::new())
            }
        }
    }

    /// True when the token is empty or whitespace only
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }

    /// Fail fast with an authentication error if there is no usable token
    pub fn ensure_present(&self) -> InferenceResult<()> {
        if self.is_empty() {
            return Err(InferenceError::authentication("credential is missing or empty"));
        }
        Ok(())
    }

    /// Raw token, for building the request header only
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret().trim()
    }
}
