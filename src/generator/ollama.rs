/// Ollama generation backend.
///
/// Posts the prompt to a local Ollama server (`POST /api/generate`,
/// non-streaming) and returns the completed answer. The request carries
/// no timeout: local generation blocks until the model answers or the
/// connection fails.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Generator, GeneratorError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

pub struct OllamaGenerator {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaGenerator {
    /// Client for `model` served at `base_url`.
    pub fn new(base_url: &str, model: &str) -> Result<Self, GeneratorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| GeneratorError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Probe `/api/version` without generating. Used at startup to warn
    /// early when the server is down.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        let url = format!("{}/api/version", self.base_url);
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .and_then(|probe| probe.get(&url).send())
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }
}

impl Generator for OllamaGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("Prompting {} ({} chars)", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .map_err(|e| {
                GeneratorError::Unreachable(format!(
                    "failed to reach Ollama at {}: {e}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(GeneratorError::Failed(format!(
                "Ollama returned {status}: {}",
                body.trim()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GeneratorError::Failed(format!("invalid response body: {e}")))?;

        Ok(parsed.response.trim().to_string())
    }
}
