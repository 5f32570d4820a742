//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that frames a
//! corpus of blocks, trains merges over it, and decodes the result back
//! into blocks.

use crate::framing::{CorpusFramer, DEFAULT_SEPARATOR};
use blockpair_core::{apply_merge, MergeDecoder, MergeMap, Result, TokenId, TokenizerError};
use blockpair_training::{BpeTrainer, TrainingConfig, TrainingStats};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Upper bound on merge iterations during training
    pub num_merges: usize,
    /// Literal placed between blocks of the joined corpus
    pub separator: String,
    /// Reject blocks that contain the separator instead of warning
    pub strict_framing: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            num_merges: TrainingConfig::default().num_merges,
            separator: DEFAULT_SEPARATOR.to_string(),
            strict_framing: false,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of merges.
    pub fn num_merges(mut self, num_merges: usize) -> Self {
        self.config.num_merges = num_merges;
        self
    }

    /// Set the block separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Reject blocks containing the separator during training.
    pub fn strict_framing(mut self, strict: bool) -> Self {
        self.config.strict_framing = strict;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Artifacts of training over a corpus.
#[derive(Debug, Clone)]
pub struct TrainedCorpus {
    /// The joined corpus after all merges
    pub encoded: Vec<TokenId>,
    /// Learned merges in discovery order
    pub merges: MergeMap,
    /// Training run summary
    pub stats: TrainingStats,
    /// Number of blocks that were joined
    pub block_count: usize,
}

/// An original block next to its decoded counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPair {
    /// The block as supplied for training
    pub original: String,
    /// The block recovered from the encoded corpus
    pub decoded: String,
}

impl BlockPair {
    /// Whether decoding reproduced the block exactly.
    pub fn is_exact(&self) -> bool {
        self.original == self.decoded
    }
}

/// Outcome of training on a corpus and decoding it back into blocks.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    /// The training result
    pub trained: TrainedCorpus,
    /// Original blocks paired with decoded ones, up to the shorter list
    pub pairs: Vec<BlockPair>,
    /// Number of blocks the decoded corpus split into
    pub decoded_count: usize,
}

impl RoundTrip {
    /// Whether every block came back exactly and none were added.
    pub fn is_exact(&self) -> bool {
        self.decoded_count == self.trained.block_count
            && self.pairs.iter().all(BlockPair::is_exact)
    }
}

/// Main tokenizer struct.
///
/// Starts without merges; [`Tokenizer::train`] replaces them with the ones
/// learned from a corpus.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Configuration
    config: TokenizerConfig,
    /// Block framing
    framer: CorpusFramer,
    /// Learned merges
    merges: MergeMap,
    /// Decoder built from `merges`
    decoder: MergeDecoder,
}

impl Tokenizer {
    /// Create a new tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        let framer = CorpusFramer::new(config.separator.clone())?;
        let merges = MergeMap::new();
        let decoder = MergeDecoder::new(&merges);

        Ok(Self {
            config,
            framer,
            merges,
            decoder,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Get the block framer.
    pub fn framer(&self) -> &CorpusFramer {
        &self.framer
    }

    /// Get the learned merges.
    pub fn merges(&self) -> &MergeMap {
        &self.merges
    }

    /// Train merges over the joined blocks.
    ///
    /// Any merges from a previous run are replaced.
    pub fn train<S: AsRef<str>>(&mut self, blocks: &[S]) -> Result<TrainedCorpus> {
        if let Some(index) = self.framer.find_conflict(blocks) {
            if self.config.strict_framing {
                return Err(TokenizerError::SeparatorInBlock { index });
            }
            log::warn!(
                "block {} contains separator {:?}; it will not split back cleanly",
                index,
                self.framer.separator()
            );
        }

        let sequence = self.framer.join(blocks);
        log::info!(
            "joined {} blocks into {} bytes",
            blocks.len(),
            sequence.len()
        );

        let trainer = BpeTrainer::with_num_merges(self.config.num_merges);
        let output = trainer.train(sequence)?;

        self.decoder = MergeDecoder::new(&output.merges);
        self.merges = output.merges.clone();

        Ok(TrainedCorpus {
            encoded: output.sequence,
            merges: output.merges,
            stats: output.stats,
            block_count: blocks.len(),
        })
    }

    /// Encode new text by replaying the learned merges in order.
    ///
    /// Fails with [`TokenizerError::ByteCollision`] if the text contains a
    /// byte whose value is also a learned merge ID, since the result could
    /// not be decoded unambiguously.
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        let mut ids: Vec<TokenId> = Vec::with_capacity(text.len());
        for byte in text.bytes() {
            let id = TokenId::from(byte);
            if self.decoder.is_composite(id) {
                return Err(TokenizerError::ByteCollision { byte, id });
            }
            ids.push(id);
        }

        for merge in &self.merges {
            if ids.len() < 2 {
                break;
            }
            ids = apply_merge(&ids, merge.pair, merge.id);
        }

        Ok(Encoding {
            ids,
            text: text.to_string(),
        })
    }

    /// Decode token IDs back to text.
    pub fn decode(&self, ids: &[TokenId]) -> Result<String> {
        self.decoder.decode(ids)
    }

    /// Decode token IDs and split the text back into blocks.
    pub fn decode_blocks(&self, ids: &[TokenId]) -> Result<Vec<String>> {
        let text = self.decode(ids)?;
        Ok(self.framer.split(&text))
    }

    /// Train on `blocks`, decode the result and pair every block with its
    /// decoded counterpart.
    ///
    /// Pairs stop at the shorter of the two block lists; the decoded count
    /// is kept in [`RoundTrip::decoded_count`].
    pub fn round_trip<S: AsRef<str>>(&mut self, blocks: &[S]) -> Result<RoundTrip> {
        let trained = self.train(blocks)?;
        let decoded = self.decode_blocks(&trained.encoded)?;

        if decoded.len() != blocks.len() {
            log::warn!(
                "decoded {} blocks from {} originals",
                decoded.len(),
                blocks.len()
            );
        }

        let decoded_count = decoded.len();
        let pairs = blocks
            .iter()
            .zip(decoded)
            .map(|(original, decoded)| BlockPair {
                original: original.as_ref().to_string(),
                decoded,
            })
            .collect();

        Ok(RoundTrip {
            trained,
            pairs,
            decoded_count,
        })
    }
}

/// Result of encoding text.
#[derive(Debug, Clone)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<TokenId>,
    /// Original text
    pub text: String,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpair_training::StopReason;

    #[test]
    fn test_builder() {
        let tokenizer = Tokenizer::builder()
            .num_merges(42)
            .separator("<s>")
            .build()
            .unwrap();

        assert_eq!(tokenizer.config().num_merges, 42);
        assert_eq!(tokenizer.framer().separator(), "<s>");
        assert!(tokenizer.merges().is_empty());
    }

    #[test]
    fn test_builder_rejects_empty_separator() {
        assert!(Tokenizer::builder().separator("").build().is_err());
    }

    #[test]
    fn test_two_block_scenario() {
        let mut tokenizer = Tokenizer::builder().num_merges(50).build().unwrap();
        let blocks = ["ab", "ab"];

        assert_eq!(tokenizer.framer().join(&blocks).len(), 9);

        let trained = tokenizer.train(&blocks).unwrap();
        let first = trained.merges.iter().next().unwrap();
        assert_eq!(first.pair, (u32::from(b'a'), u32::from(b'b')));
        assert_eq!(trained.block_count, 2);

        assert_eq!(tokenizer.decode_blocks(&trained.encoded).unwrap(), blocks);
    }

    #[test]
    fn test_round_trip_many_merge_counts() {
        let blocks = [
            "The quick brown fox",
            "",
            "jumps over the lazy dog",
            "the the the",
            "naïve café — 東京",
            "",
        ];

        for num_merges in [0, 1, 5, 50, 10_000] {
            let mut tokenizer = Tokenizer::builder().num_merges(num_merges).build().unwrap();
            let result = tokenizer.round_trip(&blocks).unwrap();

            assert_eq!(result.pairs.len(), blocks.len());
            assert_eq!(result.decoded_count, blocks.len());
            assert!(result.is_exact());
            assert!(result.trained.stats.merges_learned <= num_merges);
        }
    }

    #[test]
    fn test_round_trip_exhausts_pairs() {
        let mut tokenizer = Tokenizer::builder().num_merges(100_000).build().unwrap();
        let result = tokenizer.round_trip(&["abc", "abd"]).unwrap();

        assert_eq!(result.trained.stats.stop_reason, StopReason::PairsExhausted);
        assert_eq!(result.trained.encoded.len(), 1);
        assert!(result.is_exact());
    }

    #[test]
    fn test_merge_ids_unique_and_increasing() {
        let blocks = ["lorem ipsum dolor sit amet", "consectetur adipiscing elit"];
        let mut tokenizer = Tokenizer::builder().num_merges(200).build().unwrap();
        let trained = tokenizer.train(&blocks).unwrap();

        let mut seen = std::collections::HashSet::new();
        let mut previous = *tokenizer.framer().join(&blocks).iter().max().unwrap();
        for merge in &trained.merges {
            assert!(seen.insert(merge.pair));
            assert!(merge.id > previous);
            previous = merge.id;
        }
    }

    #[test]
    fn test_separator_in_block() {
        let blocks = ["a[SEP]b", "c"];

        let mut lenient = Tokenizer::builder().num_merges(5).build().unwrap();
        let result = lenient.round_trip(&blocks).unwrap();
        assert_eq!(result.pairs.len(), 2);
        assert_eq!(result.pairs[0].decoded, "a");
        assert_eq!(result.decoded_count, 3);
        assert!(!result.is_exact());

        let mut strict = Tokenizer::builder()
            .num_merges(5)
            .strict_framing(true)
            .build()
            .unwrap();
        assert!(matches!(
            strict.train(&blocks),
            Err(TokenizerError::SeparatorInBlock { index: 0 })
        ));
    }

    #[test]
    fn test_encode_matches_training() {
        let blocks = ["hello world", "hello there", "world of hello"];
        let mut tokenizer = Tokenizer::builder().num_merges(20).build().unwrap();
        let trained = tokenizer.train(&blocks).unwrap();

        let joined = String::from_utf8(tokenizer.framer().join_bytes(&blocks)).unwrap();
        let encoding = tokenizer.encode(&joined).unwrap();
        assert_eq!(encoding.ids, trained.encoded);

        let fresh = tokenizer.encode("hello").unwrap();
        assert!(fresh.len() < 5);
        assert_eq!(tokenizer.decode(&fresh.ids).unwrap(), "hello");
    }

    #[test]
    fn test_encode_byte_collision() {
        let mut tokenizer = Tokenizer::builder().num_merges(1).build().unwrap();
        // Largest byte is 'b', so the first merge ID is 'c'
        tokenizer.train(&["abab"]).unwrap();
        assert_eq!(tokenizer.merges().first_id(), Some(u32::from(b'c')));

        assert!(matches!(
            tokenizer.encode("abc"),
            Err(TokenizerError::ByteCollision { byte: b'c', .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_ids() {
        let tokenizer = Tokenizer::builder().build().unwrap();
        assert!(matches!(
            tokenizer.decode(&[104, 105, 9_999]),
            Err(TokenizerError::UnknownTokenId(9_999))
        ));
    }
}
