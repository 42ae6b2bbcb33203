//! OpenAI-compatible chat-completions provider.
//!
//! Speaks the `/chat/completions` wire format with bearer-token auth. Any
//! endpoint implementing that format works, not just api.openai.com.

use crate::client::{ChatMessage, CompletionClient, CompletionRequest};
use serde::Deserialize;
use triage_core::{AppError, AppResult};

/// Chat-completions API response format. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// OpenAI-compatible completion client.
pub struct OpenAiClient {
    /// Full URL of the chat-completions endpoint
    url: String,

    /// Bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client for the given endpoint.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<String> {
        tracing::info!(model = %request.model, "Sending completion request");
        tracing::debug!("Request: {:?}", request);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Completion(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Completion("Response contained no choices".to_string()))?;

        tracing::info!("Received completion");

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("http://localhost:8080/v1/chat/completions", "key");
        assert_eq!(client.provider_name(), "openai");
        assert_eq!(client.url, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_response_parsing_takes_first_choice() {
        let body = r#"{
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "first" }, "finish_reason": "stop" },
                { "index": 1, "message": { "role": "assistant", "content": "second" }, "finish_reason": "stop" }
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "first");
    }

    #[test]
    fn test_response_parsing_empty_choices() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
