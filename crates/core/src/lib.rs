//! Triage Core Library
//!
//! Foundational utilities shared by the triage pipeline crates:
//! - Error handling (`AppError`, `AppResult`)
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
