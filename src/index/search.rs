/// Nearest-neighbor queries over the vector index.
use rusqlite::params;
use thiserror::Error;

use super::{VectorIndex, serialize_vector};

#[derive(Error, Debug)]
pub enum SearchError {
    /// Query against an index that was never built, or built with zero
    /// entries.
    #[error("vector index is empty; build it before querying")]
    EmptyIndex,

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

/// One retrieved chunk; result lists are ordered most-similar-first.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub position: usize,
    pub content: String,
    /// Cosine similarity mapped into [0, 1].
    pub similarity: f64,
}

impl VectorIndex {
    /// Return the `k` entries nearest to `query_vector` by cosine
    /// distance, most-similar-first. Ties resolve to the earlier-inserted
    /// chunk. A `k` larger than the index size returns every entry.
    pub fn query(&self, query_vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>, SearchError> {
        if self.is_empty()? {
            return Err(SearchError::EmptyIndex);
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                c.position,
                c.content,
                vec_distance_cosine(v.embedding, ?) AS distance
            FROM vec_chunks v
            JOIN chunks c ON v.rowid = c.id
            ORDER BY distance ASC, c.position ASC
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(
            params![serialize_vector(query_vector), k as i64],
            |row| {
                let distance: f64 = row.get(2)?;
                Ok(ScoredChunk {
                    position: row.get::<_, i64>(0)? as usize,
                    content: row.get(1)?,
                    similarity: 1.0 - distance / 2.0,
                })
            },
        )?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }

        Ok(results)
    }
}
