//! Prompt template and curl equivalence integration tests
//!
//! Tests for:
//! - Rendering a system template plus `{question}` and running it
//! - The curl body matching what the client actually sends

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use serde_json::json;
use serving_client::{
    transport::RecordingTransport, ChatPromptTemplate, CurlCommand, EmbeddingInput,
    GenerationParams, InferenceClient, Role,
};

use crate::common::{self, constants};
use crate::mocks::{MockServingEndpoint, ServingTestData};

#[tokio::test]
async fn test_prompt_template_pipeline() {
    let mock = MockServingEndpoint::start().await;
    mock.mock_chat_completion_success(ServingTestData::chat_response(
        "Open the Compute page and click Create compute.",
    ))
    .await;

    let template = ChatPromptTemplate::from_messages([
        (Role::System, "You are an assistant for {product} users. Context: {context}"),
        (Role::User, "{question}"),
    ])
    .unwrap();
    let variables = HashMap::from([
        ("product".to_string(), "Databricks".to_string()),
        ("context".to_string(), String::new()),
        (
            "question".to_string(),
            "How to start a Databricks cluster?".to_string(),
        ),
    ]);
    let params = GenerationParams::default().temperature(0.01).max_tokens(500);

    let answer = common::http_client()
        .complete_prompt(
            &common::chat_config(&mock.base_url()),
            &common::test_credential(),
            &template,
            &variables,
            params,
        )
        .await
        .unwrap();

    assert_eq!(answer, "Open the Compute page and click Create compute.");

    let bodies = mock.received_bodies().await;
    let body = &bodies[0];
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "You are an assistant for Databricks users. Context: "},
            {"role": "user", "content": "How to start a Databricks cluster?"}
        ])
    );
    assert_eq!(body["max_tokens"], 500);
    assert!((body["temperature"].as_f64().unwrap() - 0.01).abs() < 1e-6);
}

#[tokio::test]
async fn test_prompt_missing_variable_sends_nothing() {
    let mock = MockServingEndpoint::start().await;
    let template = ChatPromptTemplate::from_messages([(Role::User, "{question}")]).unwrap();

    let result = common::http_client()
        .complete_prompt(
            &common::chat_config(&mock.base_url()),
            &common::test_credential(),
            &template,
            &HashMap::new(),
            GenerationParams::default(),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_curl_chat_body_is_byte_identical() {
    let transport = RecordingTransport::new()
        .respond_json(200, json!({"choices": [{"message": {"content": "ok"}}]}));
    let client = InferenceClient::with_transport(transport);
    let config = common::invocations_config("https://example.test/serving-endpoints");
    let request = common::sample_chat_request();

    client
        .chat_complete(&config, &common::test_credential(), &request)
        .await
        .unwrap();

    let requests = client.transport().requests();
    let sent = &requests[0];
    let command = CurlCommand::chat(&config, &request).unwrap();

    assert_eq!(command.body().as_bytes(), sent.body.as_slice());
    assert_eq!(command.url(), sent.url);
    assert!(command
        .render("DATABRICKS_TOKEN", "data.json")
        .ends_with("/serving-endpoints/databricks-dbrx-instruct/invocations"));
}

#[tokio::test]
async fn test_curl_embedding_body_is_byte_identical() {
    let transport = RecordingTransport::new().respond_json(
        200,
        json!({"data": [{"index": 0, "embedding": [0.1]}]}),
    );
    let client = InferenceClient::with_transport(transport);
    let config = common::embedding_config("https://example.test/serving-endpoints");
    let input = EmbeddingInput::from(vec!["What is Apache Spark?"]);

    client
        .embed(&config, &common::test_credential(), input.clone())
        .await
        .unwrap();

    let requests = client.transport().requests();
    let sent = &requests[0];
    let command = CurlCommand::embeddings(&config, &input).unwrap();

    assert_eq!(command.body().as_bytes(), sent.body.as_slice());
    assert_eq!(sent.url, "https://example.test/serving-endpoints/embeddings");
    assert!(!command
        .render("DATABRICKS_TOKEN", "data.json")
        .contains(constants::TEST_TOKEN));
}
