//! Error types for the triage pipeline.
//!
//! This module defines a unified error enum covering every failure category
//! in the workspace: configuration, I/O, and the three external pipeline
//! stages (embedding, vector search, completion).

use thiserror::Error;

/// Unified error type for the triage workspace.
///
/// All fallible functions return `Result<T, AppError>`. We never panic —
/// errors must be represented and propagated. The orchestrator converts the
/// three stage variants into user-facing fallback turns; they never escape
/// the pipeline as hard errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding provider errors (network, non-2xx, missing vector)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector search provider errors (network, non-2xx, unparsable body).
    /// An empty result set is NOT an error.
    #[error("Search error: {0}")]
    Search(String),

    /// Completion provider errors (network, non-2xx, empty choice list)
    #[error("Completion error: {0}")]
    Completion(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
