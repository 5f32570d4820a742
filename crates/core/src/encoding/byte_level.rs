//! Byte-level expansion of merged token streams.
//!
//! Every composite ID is replaced by the pair it was built from until only
//! raw byte values remain. Expansion uses an explicit work stack because the
//! nesting depth can grow with the number of merges.

use crate::core::{MergeMap, Pair, TokenId};
use crate::{Result, TokenizerError};
use ahash::AHashMap;

/// Decoder for sequences produced by merge training.
#[derive(Debug, Clone)]
pub struct MergeDecoder {
    /// Merge ID -> the pair it replaced
    inverse: AHashMap<TokenId, Pair>,
}

impl MergeDecoder {
    /// Create a decoder for the given merge map.
    pub fn new(merges: &MergeMap) -> Self {
        Self {
            inverse: merges.inverse(),
        }
    }

    /// Expand token IDs into raw bytes.
    ///
    /// Fails with [`TokenizerError::UnknownTokenId`] for an ID that is
    /// neither a merge ID nor a byte value.
    pub fn decode_bytes(&self, ids: &[TokenId]) -> Result<Vec<u8>> {
        let mut stack: Vec<TokenId> = ids.iter().rev().copied().collect();
        let mut bytes = Vec::with_capacity(ids.len());

        while let Some(id) = stack.pop() {
            match self.inverse.get(&id) {
                Some(&(first, second)) => {
                    // Second goes in first so that `first` is expanded next
                    stack.push(second);
                    stack.push(first);
                }
                None => {
                    let byte = u8::try_from(id).map_err(|_| TokenizerError::UnknownTokenId(id))?;
                    bytes.push(byte);
                }
            }
        }

        Ok(bytes)
    }

    /// Decode token IDs back to text.
    ///
    /// Invalid UTF-8 in the expanded bytes is reported as
    /// [`TokenizerError::InvalidUtf8`], never replaced.
    pub fn decode(&self, ids: &[TokenId]) -> Result<String> {
        let bytes = self.decode_bytes(ids)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Whether `id` is a merge ID known to this decoder.
    #[inline]
    pub fn is_composite(&self, id: TokenId) -> bool {
        self.inverse.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_without_merges() {
        let decoder = MergeDecoder::new(&MergeMap::new());
        let ids: Vec<TokenId> = "Hello, world!".bytes().map(TokenId::from).collect();

        assert_eq!(decoder.decode(&ids).unwrap(), "Hello, world!");
        assert_eq!(decoder.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_decode_nested_merges() {
        // 256 = "ab", 257 = "ab" + "c", 258 = 257 + 257
        let merges =
            MergeMap::from_triples([(97, 98, 256), (256, 99, 257), (257, 257, 258)]).unwrap();
        let decoder = MergeDecoder::new(&merges);

        assert_eq!(decoder.decode(&[258, 100]).unwrap(), "abcabcd");
        assert_eq!(decoder.decode(&[100, 256, 257]).unwrap(), "dababc");
        assert!(decoder.is_composite(257));
        assert!(!decoder.is_composite(97));
    }

    #[test]
    fn test_decode_deep_chain() {
        // Each merge extends the previous one by a single 'x'
        let mut triples = vec![(120, 120, 256)];
        for id in 257..5_000u32 {
            triples.push((id - 1, 120, id));
        }
        let merges = MergeMap::from_triples(triples).unwrap();
        let decoder = MergeDecoder::new(&merges);

        let text = decoder.decode(&[4_999]).unwrap();
        assert_eq!(text.len(), 4_999 - 256 + 2);
        assert!(text.bytes().all(|b| b == b'x'));
    }

    #[test]
    fn test_decode_multibyte_text() {
        let text = "héllo 世界";
        let bytes: Vec<TokenId> = text.bytes().map(TokenId::from).collect();
        let merges = MergeMap::from_triples([(bytes[1], bytes[2], 256)]).unwrap();
        let decoder = MergeDecoder::new(&merges);

        let mut ids = vec![bytes[0], 256];
        ids.extend_from_slice(&bytes[3..]);
        assert_eq!(decoder.decode(&ids).unwrap(), text);
    }

    #[test]
    fn test_unknown_token_id() {
        let merges = MergeMap::from_triples([(97, 98, 256)]).unwrap();
        let decoder = MergeDecoder::new(&merges);

        assert!(matches!(
            decoder.decode(&[97, 300]),
            Err(TokenizerError::UnknownTokenId(300))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let decoder = MergeDecoder::new(&MergeMap::new());

        // A lone continuation byte
        assert!(matches!(
            decoder.decode(&[0x61, 0x80]),
            Err(TokenizerError::InvalidUtf8(_))
        ));
        assert_eq!(decoder.decode_bytes(&[0x61, 0x80]).unwrap(), vec![0x61, 0x80]);
    }
}
