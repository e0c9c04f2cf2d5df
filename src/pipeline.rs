//! Build-time and query-time wiring.
//!
//! A [`Pipeline`] value is the ready state: it exists only once chunking,
//! embedding, and index construction have all succeeded, and it owns the
//! index for its lifetime. Rebuilding means constructing a new
//! `Pipeline`; there is no partial state to fall back into.
use thiserror::Error;
use tracing::info;

use crate::chunker::{self, ChunkerError};
use crate::composer;
use crate::config::Config;
use crate::document::Document;
use crate::embedder::{Embedder, EmbedderError};
use crate::generator::{Generator, GeneratorError};
use crate::index::VectorIndex;
use crate::retriever::{RetrieveError, Retriever};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Chunker(#[from] ChunkerError),

    #[error(transparent)]
    Embedder(#[from] EmbedderError),

    #[error("index error: {0}")]
    Index(#[from] rusqlite::Error),

    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

pub struct Pipeline {
    index: VectorIndex,
    embedder: Box<dyn Embedder>,
    generator: Box<dyn Generator>,
    top_k: usize,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("top_k", &self.top_k)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Chunk `document`, embed every chunk, and rebuild `index` with the
    /// results. Any failure aborts construction and no pipeline is
    /// returned — queries are only possible against a fully built index.
    pub fn build(
        config: &Config,
        document: &Document,
        mut index: VectorIndex,
        embedder: Box<dyn Embedder>,
        generator: Box<dyn Generator>,
    ) -> Result<Self, PipelineError> {
        let chunks = chunker::split(&document.text, config.chunk_size, config.chunk_overlap)?;
        info!("Split {} into {} chunks", document.source, chunks.len());

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts)?;

        index.rebuild(&document.source, document.modified_at, &chunks, &embeddings)?;

        Ok(Self {
            index,
            embedder,
            generator,
            top_k: config.top_k,
        })
    }

    /// Number of indexed chunks.
    pub fn chunk_count(&self) -> Result<usize, PipelineError> {
        Ok(self.index.len()?)
    }

    /// Answer one question: retrieve the top-k chunks, compose the
    /// context-constrained prompt, and generate.
    pub fn answer(&self, question: &str) -> Result<String, PipelineError> {
        let retriever = Retriever::new(&self.index, self.embedder.as_ref(), self.top_k);
        let hits = retriever.retrieve(question)?;
        let prompt = composer::compose_prompt(question, &hits);
        Ok(self.generator.generate(&prompt)?)
    }
}
