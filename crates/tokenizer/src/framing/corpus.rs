//! Joining and splitting blocks around a separator.

use blockpair_core::{Result, TokenId, TokenizerError};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = "[SEP]";

/// Joins text blocks into a single token sequence and splits decoded text
/// back into blocks.
///
/// Splitting is only exact when no block contains the separator itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFramer {
    /// Literal placed between consecutive blocks
    separator: String,
}

impl CorpusFramer {
    /// Create a framer for the given separator.
    pub fn new(separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(Self { separator })
    }

    /// Get the separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Join blocks as UTF-8 bytes with the separator between neighbours.
    pub fn join_bytes<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<u8> {
        let content: usize = blocks.iter().map(|b| b.as_ref().len()).sum();
        let separators = blocks.len().saturating_sub(1) * self.separator.len();
        let mut bytes = Vec::with_capacity(content + separators);

        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                bytes.extend_from_slice(self.separator.as_bytes());
            }
            bytes.extend_from_slice(block.as_ref().as_bytes());
        }

        bytes
    }

    /// Join blocks into a token sequence, one token per byte.
    pub fn join<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<TokenId> {
        self.join_bytes(blocks)
            .into_iter()
            .map(TokenId::from)
            .collect()
    }

    /// Split text on every separator occurrence.
    ///
    /// `k` occurrences always give `k + 1` pieces, empty ones included.
    pub fn split(&self, text: &str) -> Vec<String> {
        text.split(self.separator.as_str())
            .map(|s| s.to_string())
            .collect()
    }

    /// Whether a block contains the separator literal.
    pub fn contains_separator(&self, block: &str) -> bool {
        block.contains(self.separator.as_str())
    }

    /// Index of the first block that contains the separator.
    pub fn find_conflict<S: AsRef<str>>(&self, blocks: &[S]) -> Option<usize> {
        blocks
            .iter()
            .position(|b| self.contains_separator(b.as_ref()))
    }

    /// Read a line-oriented corpus, one block per line.
    ///
    /// A trailing newline does not start an extra block. Lines must be valid
    /// UTF-8; the error names the first offending line (1-based).
    pub fn blocks_from_bytes(bytes: &[u8]) -> Result<Vec<String>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        body.split(|&b| b == b'\n')
            .enumerate()
            .map(|(i, line)| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                std::str::from_utf8(line)
                    .map(|s| s.to_string())
                    .map_err(|source| TokenizerError::MalformedInput { line: i + 1, source })
            })
            .collect()
    }
}

impl Default for CorpusFramer {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
