//! Completion integration crate for the triage pipeline.
//!
//! This crate provides a provider-agnostic abstraction for chat-completion
//! models behind a unified trait-based interface.
//!
//! # Providers
//! - **OpenAI-compatible**: any endpoint speaking the `/chat/completions`
//!   wire format (default)
//!
//! # Example
//! ```no_run
//! use triage_llm::{ChatMessage, CompletionClient, CompletionRequest, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("https://api.openai.com/v1/chat/completions", "sk-...");
//! let request = CompletionRequest::new("gpt-4")
//!     .with_system("You are a support assistant.")
//!     .with_user("Hello!");
//! let answer = client.complete(&request).await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{ChatMessage, CompletionClient, CompletionRequest};
pub use providers::OpenAiClient;
