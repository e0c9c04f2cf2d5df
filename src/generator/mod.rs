/// Answer generation: the capability boundary to the local language
/// model.
///
/// [`Generator`] is prompt-in, answer-out; the default backend is a local
/// Ollama server (see [`ollama`]). Errors are surfaced to the caller
/// unretried — the interactive boundary reports them and carries on.
pub mod mock;
pub mod ollama;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("generation model unreachable: {0}")]
    Unreachable(String),

    #[error("generation failed: {0}")]
    Failed(String),
}

/// Prompt-in, answer-out contract for a generation model.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}
