//! Format definitions for artifact export.

use blockpair_core::{MergeMap, TokenId};
use serde::Serialize;

/// Training summary in serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct SerializedStats {
    pub merges_requested: usize,
    pub merges_learned: usize,
    pub iterations: usize,
    pub initial_len: usize,
    pub final_len: usize,
    pub stop_reason: String,
}

/// Complete export of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct SerializedArtifacts<'a> {
    /// Format version
    pub version: String,
    /// Separator the blocks were joined with
    pub separator: &'a str,
    /// Number of joined blocks
    pub block_count: usize,
    /// Training summary
    pub stats: SerializedStats,
    /// Merges as `[first, second, new_id]` triples in discovery order
    pub merges: &'a MergeMap,
    /// The encoded corpus
    pub encoded: &'a [TokenId],
}
