//! Blockpair-tokenizer - High-level block BPE API
//!
//! This crate joins a corpus of text blocks around a separator, trains BPE
//! merges over the joined bytes, and decodes the result back into the
//! original blocks.
//!
//! # Example
//!
//! ```rust
//! use blockpair_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder()
//!     .num_merges(100)
//!     .separator("[SEP]")
//!     .build()?;
//!
//! let trained = tokenizer.train(&["ab", "ab"])?;
//! let blocks = tokenizer.decode_blocks(&trained.encoded)?;
//! assert_eq!(blocks, ["ab", "ab"]);
//! # Ok::<(), blockpair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use blockpair_core::{MergeMap, Result, TokenId, TokenizerError};
pub use blockpair_training::{StopReason, TrainingStats};

// Corpus framing
pub mod framing;
pub use framing::{CorpusFramer, DEFAULT_SEPARATOR};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    BlockPair, Encoding, RoundTrip, Tokenizer, TokenizerBuilder, TokenizerConfig, TrainedCorpus,
};

// Artifact export
pub mod io;
pub use io::ArtifactSaver;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
