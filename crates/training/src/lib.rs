//! Blockpair-training - BPE merge learning
//!
//! This crate learns merges from a single token sequence, typically a whole
//! corpus joined into one byte stream.
//!
//! # Features
//!
//! - Greedy most-frequent-pair selection with a fixed tie-break
//! - Early, non-error termination when the sequence runs out of pairs
//! - An observer hook that can stop training between merges
//!
//! # Example
//!
//! ```rust
//! use blockpair_training::{BpeTrainer, StopReason};
//!
//! let sequence: Vec<u32> = "abababab".bytes().map(u32::from).collect();
//! let output = BpeTrainer::with_num_merges(10).train(sequence)?;
//!
//! assert_eq!(output.stats.stop_reason, StopReason::PairsExhausted);
//! assert!(output.sequence.len() < 8);
//! # Ok::<(), blockpair_training::TokenizerError>(())
//! ```

pub use blockpair_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    BpeTrainer, MergeStep, PairCounter, StopReason, TrainingConfig, TrainingOutput, TrainingStats,
};
