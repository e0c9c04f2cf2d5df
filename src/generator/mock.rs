/// Test generators: canned replies, prompt echo, forced failure.
use super::{Generator, GeneratorError};

/// Returns a fixed reply, or echoes the prompt back when none is set.
pub struct MockGenerator {
    reply: Option<String>,
}

impl MockGenerator {
    /// Echo the prompt back verbatim, so tests can inspect composed
    /// prompts end-to-end.
    #[must_use]
    pub fn echo() -> Self {
        Self { reply: None }
    }

    /// Always answer with `reply`.
    #[must_use]
    pub fn canned(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }
}

impl Generator for MockGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        Ok(self.reply.clone().unwrap_or_else(|| prompt.to_string()))
    }
}

/// Always fails, for exercising query-time error recovery.
pub struct FailingGenerator;

impl Generator for FailingGenerator {
    fn generate(&self, _prompt: &str) -> Result<String, GeneratorError> {
        Err(GeneratorError::Unreachable(
            "mock generator is configured to fail".to_string(),
        ))
    }
}
