//! Vector search client.
//!
//! Issues a similarity query against the vector index, constrained by an
//! equality filter on the project identifier, requesting a fixed top-K over
//! the named `embeddings` vector field. Only `content` and `type` are
//! selected from matched documents.

use crate::types::ContextPassage;
use serde::Deserialize;
use serde_json::json;
use triage_core::{AppError, AppResult};

/// Header used by the search provider for authentication.
const API_KEY_HEADER: &str = "api-key";

/// Trait for vector search providers.
#[async_trait::async_trait]
pub trait VectorSearch: Send + Sync {
    /// Run a project-scoped similarity query.
    ///
    /// Returns passages in provider rank order. An empty result set is
    /// `Ok(vec![])`, not an error; errors mean the call itself failed
    /// (network, non-2xx, unparsable body).
    async fn search(&self, vector: &[f32], project: &str) -> AppResult<Vec<ContextPassage>>;
}

/// Search API response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<ContextPassage>,
}

/// HTTP vector search client.
pub struct HttpVectorSearch {
    /// Full URL of the search endpoint
    url: String,

    /// `api-key` header value
    api_key: String,

    /// Number of passages to request
    top_k: u32,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpVectorSearch {
    /// Create a new client for the given endpoint.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, top_k: u32) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            top_k,
            client: reqwest::Client::new(),
        }
    }

    /// Build the similarity query document.
    fn build_query(&self, vector: &[f32], project: &str) -> serde_json::Value {
        json!({
            "count": true,
            "select": "content, type",
            "top": self.top_k,
            "filter": format!("projectName eq '{}'", escape_odata_literal(project)),
            "vectorQueries": [
                {
                    "vector": vector,
                    "k": self.top_k,
                    "fields": "embeddings",
                    "kind": "vector"
                }
            ]
        })
    }
}

/// Escape a string literal for an OData filter expression.
///
/// Single quotes are doubled; everything else passes through.
fn escape_odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[async_trait::async_trait]
impl VectorSearch for HttpVectorSearch {
    async fn search(&self, vector: &[f32], project: &str) -> AppResult<Vec<ContextPassage>> {
        tracing::info!(project = %project, top_k = self.top_k, "Querying vector index");

        let query = self.build_query(vector, project);

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&query)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Search(format!(
                "Search API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(passages = parsed.value.len(), "Vector index query complete");

        Ok(parsed.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_document_shape() {
        let client = HttpVectorSearch::new("http://search.example", "key", 10);
        let query = client.build_query(&[0.1, 0.2, 0.3], "TeslaProject");

        assert_eq!(query["count"], true);
        assert_eq!(query["select"], "content, type");
        assert_eq!(query["top"], 10);
        assert_eq!(query["filter"], "projectName eq 'TeslaProject'");
        assert_eq!(query["vectorQueries"][0]["k"], 10);
        assert_eq!(query["vectorQueries"][0]["fields"], "embeddings");
        assert_eq!(query["vectorQueries"][0]["kind"], "vector");
        assert_eq!(query["vectorQueries"][0]["vector"][1], 0.2);
    }

    #[test]
    fn test_filter_escapes_single_quotes() {
        let client = HttpVectorSearch::new("http://search.example", "key", 3);
        let query = client.build_query(&[0.5], "O'Brien's Garage");

        assert_eq!(query["filter"], "projectName eq 'O''Brien''s Garage'");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "@odata.count": 1,
            "value": [
                { "content": "No solar charging available.", "type": "N1", "@search.score": 0.71 }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.value[0].tier, "N1");
    }

    #[test]
    fn test_response_parsing_missing_value() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"@odata.count": 0}"#).unwrap();
        assert!(parsed.value.is_empty());
    }
}
