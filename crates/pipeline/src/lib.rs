//! Answer orchestration crate for the triage pipeline.
//!
//! Composes the embedding, vector search, and completion clients into a
//! single request/response cycle and applies the human-handover policy.
//! The pipeline is stateless across requests and never returns a hard error
//! to its caller: every run, failed or not, produces a well-formed
//! [`AnswerResult`] with exactly one USER turn followed by one AGENT turn.

pub mod pipeline;
pub mod prompt;
pub mod types;

// Re-export main types
pub use pipeline::{AnswerPipeline, ESCALATION_PHRASE, ESCALATION_TIER};
pub use types::{AnswerResult, ConversationTurn, Query, Role};
