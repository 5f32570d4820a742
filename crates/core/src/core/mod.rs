//! Core BPE data structures and sequence operations.
//!
//! This module holds the merge map and the pure functions the trainer and
//! encoder share: pair counting, merge selection and merge application.

pub mod merges;
pub mod pairs;

pub use merges::{Merge, MergeMap, MergeStats, Pair, TokenId};
pub use pairs::{apply_merge, count_pairs, most_frequent, MergeCandidate};
