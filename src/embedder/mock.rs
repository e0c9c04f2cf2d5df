/// Deterministic test embedder.
///
/// Hashes the text once per 8-dimension block, so equal texts map to equal
/// vectors and the index can be exercised without model files. A text
/// queried against an index containing itself lands at cosine distance
/// zero.
use std::hash::{DefaultHasher, Hash, Hasher};

use super::{Embedder, EmbedderError};

pub struct MockEmbedder {
    dimensions: usize,
}

impl MockEmbedder {
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(384)
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
        let mut embedding = Vec::with_capacity(self.dimensions);
        for block in 0..self.dimensions.div_ceil(8) {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            block.hash(&mut hasher);
            for byte in hasher.finish().to_le_bytes() {
                if embedding.len() < self.dimensions {
                    embedding.push(f32::from(byte) / 255.0);
                }
            }
        }

        // Unit length, like the ONNX embedder's output
        let norm_sq: f32 = embedding.iter().map(|v| v * v).sum();
        if norm_sq > 0.0 {
            let inv = 1.0 / norm_sq.sqrt();
            for v in &mut embedding {
                *v *= inv;
            }
        }

        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
