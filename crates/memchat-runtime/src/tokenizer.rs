//! Byte-level reference tokenizer.
//!
//! - One token per UTF-8 byte (ids 0..=255)
//! - Lossless for valid UTF-8 input
//! - Truncation keeps the newest bytes, so a prompt's closing cue survives

use memchat_engine::{EngineError, Result, TokenId};

/// Vocabulary size of the byte tokenizer.
pub const BYTE_VOCAB_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, Default)]
pub struct ByteTokenizer;

impl ByteTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Encode `text`, keeping at most the last `max_length` tokens.
    pub fn encode(&self, text: &str, max_length: usize) -> Vec<TokenId> {
        let bytes = text.as_bytes();
        let skip = bytes.len().saturating_sub(max_length);
        bytes[skip..].iter().map(|&b| TokenId::from(b)).collect()
    }

    /// Decode tokens; a sequence cut mid-character decodes lossily.
    pub fn decode(&self, tokens: &[TokenId]) -> Result<String> {
        let bytes = tokens
            .iter()
            .map(|&t| u8::try_from(t).map_err(|_| EngineError::Tokenization(format!("invalid token id {t}"))))
            .collect::<Result<Vec<u8>>>()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn vocab_size(&self) -> usize {
        BYTE_VOCAB_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let tok = ByteTokenizer::new();
        let text = "User: héllo\nAssistant:";
        let ids = tok.encode(text, 1024);
        assert_eq!(ids.len(), text.len());
        assert_eq!(tok.decode(&ids).unwrap(), text);
    }

    #[test]
    fn truncation_keeps_tail() {
        let tok = ByteTokenizer::new();
        let ids = tok.encode("0123456789", 4);
        assert_eq!(tok.decode(&ids).unwrap(), "6789");
    }

    #[test]
    fn encode_empty_string() {
        assert!(ByteTokenizer::new().encode("", 16).is_empty());
    }

    #[test]
    fn decode_invalid_token_errors() {
        let err = ByteTokenizer::new().decode(&[72, 300]).unwrap_err();
        assert!(matches!(err, EngineError::Tokenization(_)));
    }
}
