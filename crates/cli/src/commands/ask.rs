//! Ask command handler.
//!
//! Accepts a project identifier plus either a bare question or a message
//! history file whose latest USER turn is the question.

use clap::Args;
use std::path::PathBuf;
use triage_core::{config::AppConfig, AppError, AppResult};
use triage_pipeline::{AnswerPipeline, ConversationTurn, Query};

/// Ask a question against a project knowledge base
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Project (tenant) the knowledge base is scoped to
    #[arg(short, long)]
    pub project: String,

    /// The question to ask
    pub question: Option<String>,

    /// Read a JSON message history instead; the latest USER turn is the question
    #[arg(long, conflicts_with = "question")]
    pub history: Option<PathBuf>,

    /// Print the full answer structure as JSON instead of the bare answer
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        config.validate()?;

        let query = self.build_query()?;

        let pipeline = AnswerPipeline::from_config(config);
        let result = pipeline.answer(&query).await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", result.agent_message());
        }

        if result.handover_to_human {
            tracing::info!("Conversation flagged for human handover");
        }

        Ok(())
    }

    fn build_query(&self) -> AppResult<Query> {
        if let Some(ref path) = self.history {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read history file {:?}: {}", path, e))
            })?;
            let turns: Vec<ConversationTurn> = serde_json::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse history file {:?}: {}", path, e))
            })?;
            return Query::from_history(&self.project, &turns);
        }

        let question = self
            .question
            .as_deref()
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        Query::new(&self.project, question)
    }
}
