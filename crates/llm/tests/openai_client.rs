//! HTTP-level tests for the OpenAI-compatible completion client.

use triage_llm::{CompletionClient, CompletionRequest, OpenAiClient};

fn grounded_request() -> CompletionRequest {
    CompletionRequest::new("gpt-4")
        .with_system("Only answer from the provided context.")
        .with_user("Context:\nTesla batteries are not waterproof.\n\nQuestion: Is my battery waterproof?")
}

#[tokio::test]
async fn test_complete_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "No, it is not waterproof." },
                    "finish_reason": "stop"
                }
            ]
        }"#,
        )
        .create_async()
        .await;

    let client = OpenAiClient::new(format!("{}/chat/completions", server.url()), "test-key");
    let answer = client.complete(&grounded_request()).await.unwrap();

    assert_eq!(answer, "No, it is not waterproof.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_fails_on_non_2xx() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = OpenAiClient::new(format!("{}/chat/completions", server.url()), "test-key");
    let err = client.complete(&grounded_request()).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("Completion"), "unexpected error: {}", msg);
    assert!(msg.contains("500"), "unexpected error: {}", msg);
}

#[tokio::test]
async fn test_complete_fails_on_empty_choice_list() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let client = OpenAiClient::new(format!("{}/chat/completions", server.url()), "test-key");
    let err = client.complete(&grounded_request()).await.unwrap_err();

    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn test_complete_fails_on_unreachable_endpoint() {
    // Reserved TEST-NET address, nothing listens there
    let client = OpenAiClient::new("http://192.0.2.1:1/chat/completions", "test-key");
    let result = client.complete(&grounded_request()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_response_fields_are_ignored() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "usage": { "total_tokens": 42 },
            "choices": [
                { "message": { "role": "assistant", "content": "ok" } }
            ]
        }"#,
        )
        .create_async()
        .await;

    let client = OpenAiClient::new(format!("{}/chat/completions", server.url()), "test-key");
    let answer = client.complete(&grounded_request()).await.unwrap();

    assert_eq!(answer, "ok");
}
