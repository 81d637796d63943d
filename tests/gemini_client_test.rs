//! Integration tests for the Gemini client against a mock server.

mod common;

use common::gemini_response;
use prnotes::error::GeminiError;
use prnotes::gemini::{GeminiClient, NotesGenerator};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.0-flash-001";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash-001:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::with_endpoint("test-key", MODEL, &server.uri()).expect("Failed to build client")
}

#[tokio::test]
async fn test_generate_sends_prompt_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{ "parts": [{ "text": "write notes" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_response("## 要約\n- done")))
        .expect(1)
        .mount(&server)
        .await;

    let generation = client(&server).generate("write notes").await.unwrap();

    assert_eq!(generation.text, "## 要約\n- done");
    let usage = generation.usage.expect("usage metadata");
    assert_eq!(usage.prompt_token_count, Some(321));
    assert_eq!(usage.candidates_token_count, Some(123));
    assert_eq!(usage.total_token_count, Some(444));
}

#[tokio::test]
async fn test_generate_without_usage_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "notes" }] } }]
        })))
        .mount(&server)
        .await;

    let generation = client(&server).generate("p").await.unwrap();
    assert_eq!(generation.text, "notes");
    assert!(generation.usage.is_none());
}

#[tokio::test]
async fn test_http_error_carries_status_and_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    match client(&server).generate("p").await {
        Err(GeminiError::HttpStatus { status, snippet }) => {
            assert_eq!(status, 400);
            assert!(snippet.contains("API key not valid"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_prompt_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let result = client(&server).generate("p").await;
    assert!(matches!(result, Err(GeminiError::EmptyResponse)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client(&server).generate("p").await;
    assert!(matches!(result, Err(GeminiError::Decode(_))));
}
