//! Corpus framing.
//!
//! Blocks of text are joined into one byte stream around a separator so
//! they can be trained on together, then split apart again after decoding.

pub mod corpus;

pub use corpus::{CorpusFramer, DEFAULT_SEPARATOR};
