/// Source document loading.
///
/// The corpus is one plain-text file read wholesale. Its absence is a
/// fatal precondition checked before any other component is set up.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// A loaded corpus: raw text plus its source identifier. Immutable once
/// loaded.
#[derive(Debug, Clone)]
pub struct Document {
    /// Normalized source path, used as the document identifier.
    pub source: String,
    pub text: String,
    pub modified_at: DateTime<Utc>,
}

impl Document {
    /// Read a plain-text file wholesale as the corpus.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        anyhow::ensure!(
            path.exists(),
            "'{}' not found. Create the file and paste the corpus text into it.",
            path.display()
        );

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let modified_at: DateTime<Utc> = fs::metadata(path)
            .and_then(|m| m.modified())
            .with_context(|| format!("failed to stat {}", path.display()))?
            .into();

        // Forward slashes regardless of platform, so the stored identifier
        // is stable across runs.
        let source = path.to_string_lossy().replace('\\', "/");

        Ok(Self {
            source,
            text,
            modified_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First line.\nSecond line.").unwrap();

        let doc = Document::load(file.path()).unwrap();
        assert_eq!(doc.text, "First line.\nSecond line.");
        assert!(!doc.source.is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = Document::load("/nonexistent/corpus.txt").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_source_uses_forward_slashes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        fs::write(&path, "text").unwrap();

        let doc = Document::load(&path).unwrap();
        assert!(!doc.source.contains('\\'));
    }
}
