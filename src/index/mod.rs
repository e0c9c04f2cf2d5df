//! Vector index over SQLite and sqlite-vec.
//!
//! Stores (chunk, embedding) pairs for one source document. The index is
//! rebuilt wholesale on every run: [`VectorIndex::rebuild`] replaces all
//! prior contents in a single transaction. The database file doubles as
//! the persisted index between runs.
use std::path::Path;
use std::sync::Once;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};
use sqlite_vec::sqlite3_vec_init;
use tracing::info;

use crate::chunker::Chunk;

pub mod search;

static INIT_VEC: Once = Once::new();

/// Register the sqlite-vec extension. Safe to call multiple times.
fn init_sqlite_vec() {
    INIT_VEC.call_once(|| unsafe {
        rusqlite::ffi::sqlite3_auto_extension(Some(std::mem::transmute(
            sqlite3_vec_init as *const (),
        )));
    });
}

/// SQLite-backed vector index for one document's chunks.
///
/// All vectors in an index share the dimensionality fixed at open time.
pub struct VectorIndex {
    pub(crate) conn: Connection,
    dimensions: usize,
}

impl VectorIndex {
    /// Open (or create) the index at `path` for vectors of `dimensions`.
    pub fn open<P: AsRef<Path>>(path: P, dimensions: usize) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening vector index: {}", path.display());
        init_sqlite_vec();
        Self::init(Connection::open(path)?, dimensions)
    }

    /// Open an in-memory index (used by tests).
    pub fn open_in_memory(dimensions: usize) -> Result<Self> {
        init_sqlite_vec();
        Self::init(Connection::open_in_memory()?, dimensions)
    }

    fn init(conn: Connection, dimensions: usize) -> Result<Self> {
        let vec_version: String = conn.query_row("SELECT vec_version()", [], |row| row.get(0))?;
        info!("sqlite-vec version: {vec_version}");

        conn.execute_batch(&format!(
            r#"
CREATE TABLE IF NOT EXISTS source (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    path TEXT NOT NULL,
    indexed_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    modified_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS chunks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    position INTEGER NOT NULL,
    content TEXT NOT NULL
);

CREATE VIRTUAL TABLE IF NOT EXISTS vec_chunks USING vec0(
    embedding FLOAT[{dimensions}]
);
"#
        ))?;

        Ok(Self { conn, dimensions })
    }

    /// Replace the entire index contents with `chunks` and their vectors.
    ///
    /// Chunks and embeddings are paired by position; no deduplication.
    /// Runs in one transaction, so a failed rebuild leaves the prior
    /// contents intact.
    pub fn rebuild(
        &mut self,
        source: &str,
        modified_at: DateTime<Utc>,
        chunks: &[Chunk],
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        assert_eq!(
            chunks.len(),
            embeddings.len(),
            "chunks and embeddings length mismatch"
        );
        for embedding in embeddings {
            assert_eq!(
                embedding.len(),
                self.dimensions,
                "embedding dimensionality mismatch"
            );
        }

        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM vec_chunks", [])?;
        tx.execute("DELETE FROM chunks", [])?;

        tx.execute(
            r#"
            INSERT INTO source (id, path, modified_at, indexed_at)
            VALUES (1, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                path = excluded.path,
                modified_at = excluded.modified_at,
                indexed_at = CURRENT_TIMESTAMP
            "#,
            params![source, modified_at],
        )?;

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            tx.execute(
                "INSERT INTO chunks (position, content) VALUES (?, ?)",
                params![chunk.position as i64, chunk.content],
            )?;
            let chunk_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO vec_chunks (rowid, embedding) VALUES (?, ?)",
                params![chunk_id, serialize_vector(embedding)],
            )?;
        }

        tx.commit()?;
        info!("Indexed {} chunks from {source}", chunks.len());
        Ok(())
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Serialize a float32 vector into the blob format of the vec0 table.
pub(crate) fn serialize_vector(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}
