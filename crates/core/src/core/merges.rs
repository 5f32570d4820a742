//! Merge map management for BPE.
//!
//! A merge map records, in discovery order, which adjacent pair of token IDs
//! was replaced by which freshly allocated ID. Lookups by pair go through a
//! hash index; iteration follows insertion order.

use crate::{Result, TokenizerError};
use ahash::AHashMap;
use serde::ser::{Serialize, Serializer};

/// A token ID: a raw byte value (0-255) or a composite merge ID.
pub type TokenId = u32;

/// A pair of adjacent token IDs.
pub type Pair = (TokenId, TokenId);

/// One learned merge: `pair` is replaced by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Merge {
    /// The pair that was merged
    pub pair: Pair,
    /// The ID assigned to the pair
    pub id: TokenId,
}

impl Merge {
    /// The merge as a `(first, second, new_id)` triple.
    #[inline]
    pub fn triple(&self) -> (TokenId, TokenId, TokenId) {
        (self.pair.0, self.pair.1, self.id)
    }
}

/// Insertion-ordered mapping from pair to merge ID.
///
/// Keys are unique and IDs strictly increase in insertion order. The map
/// never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeMap {
    /// Merges in the order they were first discovered
    merges: Vec<Merge>,
    /// Pair -> ID index over `merges`
    index: AHashMap<Pair, TokenId>,
}

impl MergeMap {
    /// Create a new empty merge map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new merge map with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Build a merge map from ordered `(first, second, new_id)` triples.
    pub fn from_triples(
        triples: impl IntoIterator<Item = (TokenId, TokenId, TokenId)>,
    ) -> Result<Self> {
        let mut map = Self::new();
        for (first, second, id) in triples {
            map.insert((first, second), id)?;
        }
        Ok(map)
    }

    /// Record a merge and return the ID now assigned to `pair`.
    ///
    /// Re-inserting a known pair is a no-op that returns its existing ID.
    /// A new pair must carry an ID greater than every ID already present.
    pub fn insert(&mut self, pair: Pair, id: TokenId) -> Result<TokenId> {
        if let Some(&existing) = self.index.get(&pair) {
            return Ok(existing);
        }

        // Constituents always predate the merge that combines them, which
        // keeps expansion acyclic.
        if pair.0 >= id || pair.1 >= id {
            return Err(TokenizerError::InvalidMerge(format!(
                "ID {} does not exceed its constituents {:?}",
                id, pair
            )));
        }

        if let Some(last) = self.last_id() {
            if id <= last {
                return Err(TokenizerError::InvalidMerge(format!(
                    "ID {} for pair {:?} does not exceed previous ID {}",
                    id, pair, last
                )));
            }
        }

        self.index.insert(pair, id);
        self.merges.push(Merge { pair, id });
        Ok(id)
    }

    /// Get the merge ID for a pair.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<TokenId> {
        self.index.get(&pair).copied()
    }

    /// Get the number of merges.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Iterate merges in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Merge> {
        self.merges.iter()
    }

    /// Ordered `(first, second, new_id)` triples.
    pub fn triples(&self) -> impl Iterator<Item = (TokenId, TokenId, TokenId)> + '_ {
        self.merges.iter().map(Merge::triple)
    }

    /// The ID of the first merge, which is also the smallest.
    pub fn first_id(&self) -> Option<TokenId> {
        self.merges.first().map(|m| m.id)
    }

    /// The ID of the most recent merge, which is also the largest.
    pub fn last_id(&self) -> Option<TokenId> {
        self.merges.last().map(|m| m.id)
    }

    /// Build the inverse mapping (ID -> pair).
    pub fn inverse(&self) -> AHashMap<TokenId, Pair> {
        self.merges.iter().map(|m| (m.id, m.pair)).collect()
    }
}

impl<'a> IntoIterator for &'a MergeMap {
    type Item = &'a Merge;
    type IntoIter = std::slice::Iter<'a, Merge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Serialized as an ordered list of [first, second, new_id] triples.
impl Serialize for MergeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.triples())
    }
}

/// Statistics about a merge map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merges
    pub count: usize,
    /// Smallest merge ID (0 when empty)
    pub min_id: TokenId,
    /// Largest merge ID (0 when empty)
    pub max_id: TokenId,
}

impl MergeMap {
    /// Get statistics about the merge map.
    pub fn stats(&self) -> MergeStats {
        MergeStats {
            count: self.len(),
            min_id: self.first_id().unwrap_or(0),
            max_id: self.last_id().unwrap_or(0),
        }
    }
}
