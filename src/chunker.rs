/// Sliding-window chunker.
///
/// Splits the corpus into overlapping fixed-size character windows, the
/// unit stored in the vector index. Pure function of its inputs; character
/// based (not byte based) so multi-byte text never splits mid-codepoint.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("invalid chunking parameters: {0}")]
    InvalidConfig(String),
}

/// A contiguous character slice of the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Zero-based order within the document.
    pub position: usize,
    pub content: String,
}

/// Split `text` into chunks of at most `chunk_size` characters, each
/// sharing `overlap` characters with its predecessor.
///
/// The window advances by `chunk_size - overlap` per step; the final chunk
/// may be shorter. A text of at most `chunk_size` characters yields exactly
/// one chunk containing the whole text.
pub fn split(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<Chunk>, ChunkerError> {
    if chunk_size == 0 {
        return Err(ChunkerError::InvalidConfig(
            "chunk_size must be positive".to_string(),
        ));
    }
    if overlap >= chunk_size {
        return Err(ChunkerError::InvalidConfig(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= chunk_size {
        return Ok(vec![Chunk {
            position: 0,
            content: text.to_string(),
        }]);
    }

    let step = chunk_size - overlap;
    let mut chunks = Vec::with_capacity(chars.len() / step + 1);
    let mut start = 0;
    loop {
        let end = usize::min(start + chunk_size, chars.len());
        chunks.push(Chunk {
            position: chunks.len(),
            content: chars[start..end].iter().collect(),
        });
        if end == chars.len() {
            break;
        }
        start += step;
    }

    Ok(chunks)
}
