//! Blockpair-core - Core BPE data structures and algorithms
//!
//! This crate provides the merge map, the pair counting and merge
//! application routines, and the decoder that expands merged token streams
//! back into text.
//!
//! # Example
//!
//! ```rust
//! use blockpair_core::{apply_merge, MergeDecoder, MergeMap};
//!
//! let seq: Vec<u32> = "abab".bytes().map(u32::from).collect();
//!
//! let mut merges = MergeMap::new();
//! let id = merges.insert((97, 98), 256)?;
//! let encoded = apply_merge(&seq, (97, 98), id);
//! assert_eq!(encoded, vec![256, 256]);
//!
//! let decoder = MergeDecoder::new(&merges);
//! assert_eq!(decoder.decode(&encoded)?, "abab");
//! # Ok::<(), blockpair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Merge structures and sequence operations
pub mod core;
pub use self::core::{
    apply_merge, count_pairs, most_frequent, Merge, MergeCandidate, MergeMap, MergeStats, Pair,
    TokenId,
};

// Decoding
pub mod encoding;
pub use encoding::MergeDecoder;
