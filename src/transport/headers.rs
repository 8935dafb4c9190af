//! Header utilities for serving endpoint requests
//!
//! Builds the minimal header set every request carries. The credential is
//! marked sensitive so `HeaderMap` debug output never shows it.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::credential::Credential;
use crate::error::{InferenceError, InferenceResult};

/// Build default headers for serving endpoint requests
pub fn build_default_headers(credential: &Credential) -> InferenceResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
        .map_err(|_| InferenceError::authentication("credential contains invalid header characters"))?;
    auth.set_sensitive(true);

    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
