//! Pair counting over the working sequence.
//!
//! The counter owns the sequence being trained on. Each iteration the
//! trainer asks it for fresh pair counts, then asks it to rewrite the
//! sequence with the chosen merge.

use ahash::AHashMap;
use blockpair_core::{apply_merge, count_pairs, Pair, TokenId};

/// Counter for BPE pair frequencies over a single owned sequence.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// The working sequence, rewritten after each merge
    sequence: Vec<TokenId>,
}

impl PairCounter {
    /// Create a counter over an existing token sequence.
    pub fn new(sequence: Vec<TokenId>) -> Self {
        Self { sequence }
    }

    /// Count all adjacent pairs in the current sequence.
    pub fn count_pairs(&self) -> AHashMap<Pair, u64> {
        count_pairs(&self.sequence)
    }

    /// Replace every non-overlapping occurrence of `pair` with `new_id`.
    ///
    /// Returns the number of replacements made.
    pub fn merge_pair(&mut self, pair: Pair, new_id: TokenId) -> usize {
        let before = self.sequence.len();
        self.sequence = apply_merge(&self.sequence, pair, new_id);
        before - self.sequence.len()
    }

    /// The largest token ID in the sequence.
    pub fn max_token(&self) -> Option<TokenId> {
        self.sequence.iter().copied().max()
    }

    /// Get the current sequence length.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Get a reference to the current sequence.
    pub fn sequence(&self) -> &[TokenId] {
        &self.sequence
    }

    /// Take the sequence out of the counter.
    pub fn into_sequence(self) -> Vec<TokenId> {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_text(text: &str) -> PairCounter {
        PairCounter::new(text.bytes().map(TokenId::from).collect())
    }

    #[test]
    fn test_new() {
        let counter = from_text("abc");
        assert_eq!(counter.sequence(), &[97, 98, 99]);
        assert_eq!(counter.max_token(), Some(99));
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_count_pairs() {
        let counter = from_text("abab");
        let pairs = counter.count_pairs();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get(&(97, 98)), Some(&2));
        assert_eq!(pairs.get(&(98, 97)), Some(&1));
    }

    #[test]
    fn test_merge_pair() {
        let mut counter = from_text("aaab");

        let replaced = counter.merge_pair((97, 97), 256);
        assert_eq!(replaced, 1);
        assert_eq!(counter.sequence(), &[256, 97, 98]);

        let pairs = counter.count_pairs();
        assert_eq!(pairs.get(&(256, 97)), Some(&1));
        assert_eq!(pairs.get(&(97, 97)), None);
    }

    #[test]
    fn test_empty_counter() {
        let counter = PairCounter::default();
        assert!(counter.is_empty());
        assert!(counter.count_pairs().is_empty());
        assert_eq!(counter.max_token(), None);
    }
}
