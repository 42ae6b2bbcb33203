//! Retrieval result types.

use serde::{Deserialize, Serialize};

/// A context passage retrieved from the vector index.
///
/// Passages arrive in provider rank order, which is not necessarily score
/// order. The wire names (`type`, `@search.score`) follow the search
/// provider's document schema; other returned fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextPassage {
    /// Passage text
    pub content: String,

    /// Category tag, e.g. "N1" / "N2". "N2" marks the escalation tier.
    #[serde(rename = "type")]
    pub tier: String,

    /// Provider-assigned relevance score
    #[serde(rename = "@search.score", default)]
    pub score: f32,
}
