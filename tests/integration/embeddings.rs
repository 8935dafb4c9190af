//! Embedding integration tests
//!
//! Tests for embedding calls over the HTTP transport:
//! - Single string and batch input shapes
//! - Index-aligned output ordering
//! - Upstream failures and count mismatches

use pretty_assertions::assert_eq;
use serde_json::json;
use serving_client::InferenceError;

use crate::common::{self, constants};
use crate::mocks::{MockServingEndpoint, ServingTestData};

#[tokio::test]
async fn test_single_string_returns_one_vector() {
    let mock = MockServingEndpoint::start().await;
    mock.mock_embeddings_success(ServingTestData::embedding_response(vec![(
        0,
        vec![0.25, -0.5, 0.75],
    )]))
    .await;

    let vectors = common::http_client()
        .embed(
            &common::embedding_config(&mock.base_url()),
            &common::test_credential(),
            "Your string for the embedding model goes here",
        )
        .await
        .unwrap();

    assert_eq!(vectors, vec![vec![0.25, -0.5, 0.75]]);
    assert_eq!(
        mock.received_bodies().await[0],
        json!({
            "input": "Your string for the embedding model goes here",
            "model": constants::TEST_EMBEDDING_MODEL
        })
    );
}

#[tokio::test]
async fn test_batch_returns_vectors_in_input_order() {
    let mock = MockServingEndpoint::start().await;
    // Response lists items out of order; index decides placement
    mock.mock_embeddings_success(ServingTestData::embedding_response(vec![
        (2, vec![2.0, 2.5]),
        (0, vec![0.0, 0.5]),
        (1, vec![1.0, 1.5]),
    ]))
    .await;

    let inputs = vec![
        "What is Apache Spark?".to_string(),
        "What is Delta Lake?".to_string(),
        "What is MLflow?".to_string(),
    ];

    let vectors = common::http_client()
        .embed(
            &common::embedding_config(&mock.base_url()),
            &common::test_credential(),
            inputs.clone(),
        )
        .await
        .unwrap();

    assert_eq!(
        vectors,
        vec![vec![0.0, 0.5], vec![1.0, 1.5], vec![2.0, 2.5]]
    );
    assert_eq!(
        mock.received_bodies().await[0],
        json!({"input": inputs, "model": constants::TEST_EMBEDDING_MODEL})
    );
}

#[tokio::test]
async fn test_count_mismatch_is_malformed() {
    let mock = MockServingEndpoint::start().await;
    mock.mock_embeddings_success(ServingTestData::embedding_response(vec![(0, vec![1.0])]))
        .await;

    let result = common::http_client()
        .embed(
            &common::embedding_config(&mock.base_url()),
            &common::test_credential(),
            vec!["one", "two"],
        )
        .await;

    assert!(matches!(result, Err(InferenceError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_service_unavailable() {
    let mock = MockServingEndpoint::start().await;
    mock.mock_embeddings_service_unavailable().await;

    let err = common::http_client()
        .embed(
            &common::embedding_config(&mock.base_url()),
            &common::test_credential(),
            "text",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InferenceError::ServiceUnavailable { status: Some(503), .. }));
    assert_eq!(
        err.to_string(),
        "Service unavailable: HTTP 503: upstream connect error"
    );
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let mock = MockServingEndpoint::start().await;

    let result = common::http_client()
        .embed(
            &common::embedding_config(&mock.base_url()),
            &common::test_credential(),
            Vec::<String>::new(),
        )
        .await;

    assert!(matches!(result, Err(InferenceError::InvalidRequest { .. })));
    assert_eq!(mock.request_count().await, 0);
}
