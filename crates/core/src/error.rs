//! Error types for the blockpair libraries.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the blockpair libraries.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// An input block was not valid UTF-8
    #[error("Malformed input at line {line}: {source}")]
    MalformedInput {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A composite ID that no merge in the map produced
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Expanded bytes did not form valid UTF-8
    #[error("Invalid UTF-8 sequence during decoding: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A raw byte in new text shares its value with a learned merge ID
    #[error("Byte {byte} collides with merge ID {id}")]
    ByteCollision { byte: u8, id: u32 },

    /// A block contains the separator literal
    #[error("Block {index} contains the separator")]
    SeparatorInBlock { index: usize },

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for blockpair operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
