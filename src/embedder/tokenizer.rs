/// Wrapper around the HuggingFace `tokenizers` crate for BERT-style
/// models, producing the inputs the ONNX session expects.
use std::path::Path;

use anyhow::Result;
use tokenizers::Tokenizer;

/// all-MiniLM-L6-v2 accepts at most 256 tokens per sequence.
const MAX_SEQ_LEN: usize = 256;

pub struct BertTokenizer {
    inner: Tokenizer,
}

/// Model inputs produced from one text.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub input_ids: Vec<i64>,
    /// 1 for real tokens, 0 for padding.
    pub attention_mask: Vec<i64>,
}

impl BertTokenizer {
    /// Load `tokenizer.json` from the model directory.
    pub fn from_model_dir(model_dir: &Path) -> Result<Self> {
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {}",
            model_dir.display()
        );

        let mut inner = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;

        let _ = inner.with_truncation(Some(tokenizers::TruncationParams {
            max_length: MAX_SEQ_LEN,
            ..Default::default()
        }));
        inner.with_padding(Some(tokenizers::PaddingParams::default()));

        Ok(Self { inner })
    }

    /// Tokenize one text into input IDs and an attention mask.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("failed to encode text: {e}"))?;

        Ok(Encoding {
            input_ids: encoding.get_ids().iter().map(|&id| id as i64).collect(),
            attention_mask: encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect(),
        })
    }

    /// Vocabulary size, without added tokens.
    #[must_use]
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokenizer_file() {
        let result = BertTokenizer::from_model_dir(Path::new("/nonexistent/path"));
        assert!(result.is_err());
    }

    /// Requires downloaded model files; run with `-- --ignored`.
    #[test]
    #[ignore]
    fn test_encode_with_real_model() {
        let model_dir = Path::new("models/all-MiniLM-L6-v2");
        if !model_dir.join("tokenizer.json").exists() {
            eprintln!("Skipping: model files not downloaded");
            return;
        }

        let tokenizer = BertTokenizer::from_model_dir(model_dir).unwrap();
        let encoding = tokenizer.encode("Hello, world!").unwrap();

        assert!(!encoding.input_ids.is_empty());
        assert_eq!(encoding.input_ids.len(), encoding.attention_mask.len());
        // CLS + at least one token + SEP
        assert!(encoding.input_ids.len() >= 3);
    }
}
