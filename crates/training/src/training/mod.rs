//! Training infrastructure for BPE merges.
//!
//! This module provides the pair counter and the greedy merge learner.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::{BpeTrainer, MergeStep, StopReason, TrainingConfig, TrainingOutput, TrainingStats};
