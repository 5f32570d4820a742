//! Pair counting, merge selection and merge application.
//!
//! These are the building blocks the trainer drives once per merge
//! iteration. All of them are pure functions over token sequences.

use crate::core::merges::{Pair, TokenId};
use ahash::AHashMap;
use std::cmp::Ordering;

/// Count every adjacent pair in `seq`.
///
/// Overlapping pairs are all counted, so `[5, 5, 5]` yields `(5, 5) -> 2`.
/// Sequences shorter than two produce an empty map.
pub fn count_pairs(seq: &[TokenId]) -> AHashMap<Pair, u64> {
    let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

    for window in seq.windows(2) {
        *pair_counts.entry((window[0], window[1])).or_insert(0) += 1;
    }

    pair_counts
}

/// A pair and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Higher count wins; on equal counts the numerically smaller pair wins.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pick the most frequent pair, or `None` when there are no pairs.
///
/// Ties go to the smallest pair so that training is reproducible regardless
/// of hash iteration order.
pub fn most_frequent(pair_counts: &AHashMap<Pair, u64>) -> Option<MergeCandidate> {
    pair_counts
        .iter()
        .map(|(&pair, &count)| MergeCandidate::new(pair, count))
        .max()
}

/// Replace every occurrence of `pair` in `seq` with `new_id`.
///
/// Scans left to right and never overlaps: once a match is emitted the scan
/// resumes after its second element, so `[7, 7, 7]` with `(7, 7)` becomes
/// `[new_id, 7]`.
pub fn apply_merge(seq: &[TokenId], pair: Pair, new_id: TokenId) -> Vec<TokenId> {
    let mut merged = Vec::with_capacity(seq.len());
    let mut i = 0;

    while i < seq.len() {
        if i + 1 < seq.len() && seq[i] == pair.0 && seq[i + 1] == pair.1 {
            merged.push(new_id);
            i += 2;
        } else {
            merged.push(seq[i]);
            i += 1;
        }
    }

    merged
}
