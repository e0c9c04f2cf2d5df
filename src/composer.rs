//! Prompt assembly for the generation model.
//!
//! The template constrains the model to the retrieved context and names
//! the exact sentence to emit when the context does not contain the
//! answer, so refusals are detectable verbatim downstream.

use crate::index::search::ScoredChunk;

/// Sentence the model is instructed to emit when the context does not
/// contain the answer.
pub const REFUSAL: &str = "I cannot find the answer in the provided text.";

/// Build the generation prompt: retrieved chunk texts (in retrieved
/// order, newline-joined) as a context block, followed by the question.
#[must_use]
pub fn compose_prompt(question: &str, chunks: &[ScoredChunk]) -> String {
    let context = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful AI assistant.\n\
         Answer the question based ONLY on the following context.\n\
         If the answer is not in the context, say \"{REFUSAL}\"\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION: {question}\n"
    )
}
