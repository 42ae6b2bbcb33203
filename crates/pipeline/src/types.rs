//! Pipeline request and response types.

use serde::{Deserialize, Serialize};
use triage_core::{AppError, AppResult};
use triage_knowledge::ContextPassage;

/// Speaker role in a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Agent,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    /// Create a USER turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an AGENT turn.
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

/// An incoming question, scoped to a project knowledge base.
///
/// Created per request, immutable, discarded once the answer is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub project: String,
    pub user_message: String,
}

impl Query {
    /// Create a query, rejecting blank project names and messages.
    pub fn new(project: impl Into<String>, user_message: impl Into<String>) -> AppResult<Self> {
        let project = project.into();
        let user_message = user_message.into();

        if project.trim().is_empty() {
            return Err(AppError::Config("Project name must not be empty".to_string()));
        }
        if user_message.trim().is_empty() {
            return Err(AppError::Config("User message must not be empty".to_string()));
        }

        Ok(Self {
            project,
            user_message,
        })
    }

    /// Create a query from a message history.
    ///
    /// The latest USER turn is the question; earlier turns carry no state
    /// into the pipeline (single-turn answering, no conversation memory).
    pub fn from_history(project: impl Into<String>, turns: &[ConversationTurn]) -> AppResult<Self> {
        let latest_user = turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::User)
            .ok_or_else(|| {
                AppError::Config("Message history contains no USER turn".to_string())
            })?;

        Self::new(project, latest_user.content.clone())
    }
}

/// The terminal artifact of a pipeline run.
///
/// `turns` always contains exactly the echoed USER turn followed by one
/// AGENT turn, regardless of which stage failed. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub turns: Vec<ConversationTurn>,

    pub handover_to_human: bool,

    #[serde(rename = "retrievedPassages")]
    pub passages: Vec<ContextPassage>,
}

impl AnswerResult {
    /// Build a fallback result for a failed or empty stage: fixed agent
    /// message, handover forced, no passages.
    pub fn fallback(user_message: &str, agent_message: &str) -> Self {
        Self {
            turns: vec![
                ConversationTurn::user(user_message),
                ConversationTurn::agent(agent_message),
            ],
            handover_to_human: true,
            passages: Vec::new(),
        }
    }

    /// Build a result for a fully successful run.
    pub fn answered(
        user_message: &str,
        answer: String,
        handover_to_human: bool,
        passages: Vec<ContextPassage>,
    ) -> Self {
        Self {
            turns: vec![
                ConversationTurn::user(user_message),
                ConversationTurn::agent(answer),
            ],
            handover_to_human,
            passages,
        }
    }

    /// The generated (or fallback) agent message.
    pub fn agent_message(&self) -> &str {
        // Constructors guarantee the AGENT turn is always present
        self.turns
            .last()
            .map(|turn| turn.content.as_str())
            .unwrap_or_default()
    }
}
