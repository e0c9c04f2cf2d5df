/// Top-k retrieval: embed the question, query the index.
use thiserror::Error;

use crate::embedder::{Embedder, EmbedderError};
use crate::index::VectorIndex;
use crate::index::search::{ScoredChunk, SearchError};

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error(transparent)]
    Embed(#[from] EmbedderError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Wraps the index with a fixed top-k policy for the pipeline's lifetime.
pub struct Retriever<'a> {
    index: &'a VectorIndex,
    embedder: &'a dyn Embedder,
    top_k: usize,
}

impl<'a> Retriever<'a> {
    pub fn new(index: &'a VectorIndex, embedder: &'a dyn Embedder, top_k: usize) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    /// The chunks most relevant to `question`, closest first.
    pub fn retrieve(&self, question: &str) -> Result<Vec<ScoredChunk>, RetrieveError> {
        let query_vector = self.embedder.embed(question)?;
        Ok(self.index.query(&query_vector, self.top_k)?)
    }
}
