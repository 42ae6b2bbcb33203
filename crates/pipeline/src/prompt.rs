//! Grounded prompt construction.
//!
//! The completion model is constrained to answer only from the retrieved
//! context and to announce an escalation when the answer is not there.

use triage_knowledge::ContextPassage;

/// Fixed system instruction for grounded answering.
///
/// The escalation sentence is load-bearing: the orchestrator detects the
/// "I will escalate" phrase in the generated text to flag a handover.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a support assistant.
Only answer questions using the provided context.
If the answer is not explicitly mentioned in the context, respond with:
\"I'm sorry, I couldn't find this information in our records. I will escalate this request to a human assistant.\"

Never use external or general knowledge, even if you know the answer.";

/// Concatenate passages in retrieval order, newline-separated.
///
/// No deduplication. When `max_chars` is set, passages are dropped from the
/// tail once the cap is reached; a passage is never cut mid-text, and the
/// first passage is always included.
pub fn build_context(passages: &[ContextPassage], max_chars: Option<usize>) -> String {
    let Some(cap) = max_chars else {
        return join_contents(passages);
    };

    let mut context = String::new();
    let mut included = 0usize;

    for passage in passages {
        let needed = passage.content.len() + if context.is_empty() { 0 } else { 1 };
        if !context.is_empty() && context.len() + needed > cap {
            break;
        }
        if !context.is_empty() {
            context.push('\n');
        }
        context.push_str(&passage.content);
        included += 1;
    }

    if included < passages.len() {
        tracing::warn!(
            included,
            total = passages.len(),
            cap,
            "Context cap reached, dropping trailing passages"
        );
    }

    context
}

fn join_contents(passages: &[ContextPassage]) -> String {
    passages
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the user message embedding context and question.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!("Context:\n{}\n\nQuestion: {}", context, question)
}
