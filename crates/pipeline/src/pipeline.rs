//! The answer orchestrator.
//!
//! Runs EMBEDDING -> RETRIEVING -> COMPLETING -> DONE for each request.
//! Every stage is attempted exactly once; a failed stage short-circuits to
//! DONE with a fixed fallback AGENT message instead of propagating an error.

use crate::prompt::{build_context, build_user_prompt, SYSTEM_INSTRUCTION};
use crate::types::{AnswerResult, Query};
use std::sync::Arc;
use tracing::Instrument;
use triage_core::AppConfig;
use triage_knowledge::{ContextPassage, EmbeddingClient, HttpEmbeddingClient, HttpVectorSearch, VectorSearch};
use triage_llm::{CompletionClient, CompletionRequest, OpenAiClient};
use uuid::Uuid;

/// Passage tier that always requires human handling.
pub const ESCALATION_TIER: &str = "N2";

/// Phrase the completion model emits when the context has no answer.
/// Matched case-insensitively as a substring of the generated text.
pub const ESCALATION_PHRASE: &str = "i will escalate";

/// Agent message when embedding generation fails.
const EMBEDDING_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while generating the embedding for your question. \
     A human assistant will take over from here.";

/// Agent message when retrieval fails or matches nothing.
const NO_ANSWER_MESSAGE: &str =
    "Sorry, I couldn't find an answer to your question. \
     A human assistant will take over from here.";

/// Agent message when the completion call fails.
const COMPLETION_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while generating your answer. \
     A human assistant will take over from here.";

/// The retrieval-augmented answer pipeline.
///
/// Holds only immutable configuration and client handles; safe to share
/// across concurrent requests. Stateless between runs.
pub struct AnswerPipeline {
    embedding: Arc<dyn EmbeddingClient>,
    search: Arc<dyn VectorSearch>,
    completion: Arc<dyn CompletionClient>,

    /// Completion model identifier
    model: String,

    /// Optional cap on concatenated context length
    max_context_chars: Option<usize>,
}

impl AnswerPipeline {
    /// Assemble a pipeline from explicit client handles.
    pub fn new(
        embedding: Arc<dyn EmbeddingClient>,
        search: Arc<dyn VectorSearch>,
        completion: Arc<dyn CompletionClient>,
        model: impl Into<String>,
        max_context_chars: Option<usize>,
    ) -> Self {
        Self {
            embedding,
            search,
            completion,
            model: model.into(),
            max_context_chars,
        }
    }

    /// Assemble a pipeline with HTTP clients built from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let embedding = HttpEmbeddingClient::new(
            &config.embedding.url,
            &config.embedding.api_key,
            &config.embedding.model,
        );
        let search = HttpVectorSearch::new(
            &config.search.url,
            &config.search.api_key,
            config.search.top_k,
        );
        let completion = OpenAiClient::new(&config.completion.url, &config.completion.api_key);

        Self::new(
            Arc::new(embedding),
            Arc::new(search),
            Arc::new(completion),
            config.completion.model.clone(),
            config.max_context_chars,
        )
    }

    /// Answer a query.
    ///
    /// Always returns a well-formed [`AnswerResult`]; stage failures become
    /// fallback AGENT turns with `handover_to_human` forced to true.
    pub async fn answer(&self, query: &Query) -> AnswerResult {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("answer", %request_id, project = %query.project);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: &Query) -> AnswerResult {
        tracing::info!("Stage: embedding");
        let vector = match self.embedding.embed(&query.user_message).await {
            Ok(vector) => vector,
            Err(e) => {
                tracing::error!("Embedding stage failed: {}", e);
                return AnswerResult::fallback(&query.user_message, EMBEDDING_FAILURE_MESSAGE);
            }
        };

        tracing::info!("Stage: retrieving");
        let passages = match self.search.search(&vector, &query.project).await {
            Ok(passages) => passages,
            Err(e) => {
                tracing::error!("Retrieval stage failed: {}", e);
                return AnswerResult::fallback(&query.user_message, NO_ANSWER_MESSAGE);
            }
        };

        if passages.is_empty() {
            // Same user-facing fallback as a failed call, logged differently
            tracing::info!("Retrieval matched no passages");
            return AnswerResult::fallback(&query.user_message, NO_ANSWER_MESSAGE);
        }

        tracing::info!(passages = passages.len(), "Stage: completing");
        let context = build_context(&passages, self.max_context_chars);
        let request = CompletionRequest::new(&self.model)
            .with_system(SYSTEM_INSTRUCTION)
            .with_user(build_user_prompt(&query.user_message, &context));

        let answer = match self.completion.complete(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Completion stage failed: {}", e);
                return AnswerResult::fallback(&query.user_message, COMPLETION_FAILURE_MESSAGE);
            }
        };

        let tier_escalation = has_escalation_tier(&passages);
        let model_escalation = signals_escalation(&answer);
        let handover = tier_escalation || model_escalation;

        tracing::info!(
            handover,
            tier_escalation,
            model_escalation,
            "Stage: done"
        );

        AnswerResult::answered(&query.user_message, answer, handover, passages)
    }
}

/// True if any passage carries the escalation tier (case-insensitive).
fn has_escalation_tier(passages: &[ContextPassage]) -> bool {
    passages
        .iter()
        .any(|p| p.tier.eq_ignore_ascii_case(ESCALATION_TIER))
}

/// True if the generated text contains the escalation phrase.
fn signals_escalation(answer: &str) -> bool {
    answer.to_lowercase().contains(ESCALATION_PHRASE)
}
