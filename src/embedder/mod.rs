/// Text embedding: the capability boundary between the corpus and the
/// vector index.
///
/// [`Embedder`] is a narrow contract — anything that maps text to a
/// fixed-dimension vector can back the pipeline. The default backend is
/// ONNX inference over all-MiniLM-L6-v2 (see [`onnx`]); [`mock`] provides
/// a deterministic stand-in for tests.
pub mod download;
pub mod mock;
pub mod onnx;
pub mod tokenizer;

use thiserror::Error;

/// Errors that can occur during embedding operations.
#[derive(Error, Debug)]
pub enum EmbedderError {
    /// The embedding model could not be loaded or reached. Fatal to
    /// pipeline construction; never retried.
    #[error("embedding model unavailable: {0}")]
    Unavailable(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}

/// Maps text to fixed-dimension vectors.
///
/// Deterministic for a fixed model: the same text always yields the same
/// vector. Implementations must be `Send + Sync` for use behind trait
/// objects.
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of [`Self::dimensions`] floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;

    /// Embed multiple texts, preserving input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Dimensionality shared by every vector this embedder produces.
    fn dimensions(&self) -> usize;
}
