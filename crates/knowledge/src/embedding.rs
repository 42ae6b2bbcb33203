//! Embedding client.
//!
//! Turns free text into an embedding vector via an OpenAI-compatible
//! embeddings endpoint (`{ input, model }` in, `{ data: [ { embedding } ] }`
//! out, bearer-token auth).

use serde::{Deserialize, Serialize};
use triage_core::{AppError, AppResult};

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Get the provider name.
    fn provider_name(&self) -> &str;

    /// Generate an embedding vector for a single text.
    ///
    /// One attempt per call, no retries. Fails on network error, non-2xx
    /// status, or a response without at least one embedding entry.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// Embeddings API request payload.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

/// Embeddings API response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// HTTP embedding client.
pub struct HttpEmbeddingClient {
    /// Full URL of the embeddings endpoint
    url: String,

    /// Bearer token
    api_key: String,

    /// Embedding model identifier
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpEmbeddingClient {
    /// Create a new client for the given endpoint and model.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        tracing::info!(model = %self.model, "Sending text to embedding API");

        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Embedding(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Embedding(format!("Failed to parse response: {}", e)))?;

        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                AppError::Embedding("Response contained no embedding entries".to_string())
            })?;

        tracing::debug!(dimensions = vector.len(), "Embedding generated");

        Ok(vector)
    }
}
