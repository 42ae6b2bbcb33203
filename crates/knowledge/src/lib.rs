//! Knowledge retrieval crate for the triage pipeline.
//!
//! Two thin clients over the project knowledge base:
//! - [`EmbeddingClient`]: turns free text into an embedding vector via an
//!   OpenAI-compatible embeddings endpoint.
//! - [`VectorSearch`]: runs a project-scoped similarity query against the
//!   vector index and returns ranked context passages.
//!
//! Both are single-attempt clients; the orchestrator treats any error as a
//! terminal stage failure for the current request.

pub mod embedding;
pub mod search;
pub mod types;

// Re-export main types
pub use embedding::{EmbeddingClient, HttpEmbeddingClient};
pub use search::{HttpVectorSearch, VectorSearch};
pub use types::ContextPassage;
