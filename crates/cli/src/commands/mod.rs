//! Command handlers for the triage CLI.

pub mod ask;

// Re-export command types for convenience
pub use ask::AskCommand;
