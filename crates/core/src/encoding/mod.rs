//! Decoding of merged token streams.
//!
//! Composite IDs are expanded back into the raw bytes they were built from.

pub mod byte_level;

pub use byte_level::MergeDecoder;
