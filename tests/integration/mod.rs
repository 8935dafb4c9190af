//! Integration tests for serving-client
//!
//! These tests drive the client end to end over HTTP against a wiremock
//! serving endpoint, covering request shape, authentication and the error
//! taxonomy.

mod embeddings;
mod prompt_and_curl;
