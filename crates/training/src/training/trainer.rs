//! BPE trainer implementation.
//!
//! Each iteration counts every adjacent pair in the working sequence,
//! picks the most frequent one, assigns it an ID and rewrites the sequence.
//! Training stops after `num_merges` iterations or as soon as no pair is
//! left, whichever comes first.

use super::counter::PairCounter;
use blockpair_core::{most_frequent, MergeMap, Pair, Result, TokenId, TokenizerError};
use std::ops::ControlFlow;

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Upper bound on merge iterations
    pub num_merges: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { num_merges: 5_000 }
    }
}

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All requested iterations ran
    MergeLimit,
    /// The sequence ran out of pairs first
    PairsExhausted,
    /// The observer asked to stop
    Cancelled,
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingStats {
    /// Iterations the caller asked for
    pub merges_requested: usize,
    /// Distinct merges recorded in the merge map
    pub merges_learned: usize,
    /// Iterations actually run
    pub iterations: usize,
    /// Sequence length before training
    pub initial_len: usize,
    /// Sequence length after training
    pub final_len: usize,
    /// Why the run ended
    pub stop_reason: StopReason,
}

impl TrainingStats {
    /// Whether fewer merges were learned than requested.
    pub fn is_short(&self) -> bool {
        self.merges_learned < self.merges_requested
    }

    /// Ratio of initial to final sequence length (1.0 for empty input).
    pub fn compression_ratio(&self) -> f64 {
        if self.final_len == 0 {
            return 1.0;
        }
        self.initial_len as f64 / self.final_len as f64
    }
}

/// One completed merge iteration, reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStep {
    /// Zero-based iteration number
    pub iteration: usize,
    /// The merged pair
    pub pair: Pair,
    /// How often the pair occurred before the merge
    pub count: u64,
    /// The ID assigned to the pair
    pub id: TokenId,
    /// Sequence length after the merge
    pub sequence_len: usize,
}

/// Artifacts of a training run.
#[derive(Debug, Clone)]
pub struct TrainingOutput {
    /// The rewritten sequence
    pub sequence: Vec<TokenId>,
    /// Learned merges in discovery order
    pub merges: MergeMap,
    /// Run summary
    pub stats: TrainingStats,
}

/// BPE trainer.
///
/// Trains merges over a single token sequence by repeatedly merging the
/// most frequent adjacent pair.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer that runs at most `num_merges` iterations.
    pub fn with_num_merges(num_merges: usize) -> Self {
        Self::new(TrainingConfig { num_merges })
    }

    /// The first merge ID for a sequence: one past its largest token.
    pub fn initial_id(sequence: &[TokenId]) -> TokenId {
        sequence.iter().copied().max().map_or(0, |max| max + 1)
    }

    /// Train on `sequence`, allocating IDs from [`Self::initial_id`].
    pub fn train(&self, sequence: Vec<TokenId>) -> Result<TrainingOutput> {
        let next_id = Self::initial_id(&sequence);
        self.train_from(sequence, next_id)
    }

    /// Train on `sequence`, allocating IDs starting at `next_id`.
    pub fn train_from(&self, sequence: Vec<TokenId>, next_id: TokenId) -> Result<TrainingOutput> {
        self.train_with(sequence, next_id, |_| ControlFlow::Continue(()))
    }

    /// Train with an observer called after every merge.
    ///
    /// Returning `ControlFlow::Break` from the observer stops training
    /// before the next iteration starts.
    pub fn train_with<F>(
        &self,
        sequence: Vec<TokenId>,
        mut next_id: TokenId,
        mut observer: F,
    ) -> Result<TrainingOutput>
    where
        F: FnMut(&MergeStep) -> ControlFlow<()>,
    {
        let num_merges = self.config.num_merges;
        let initial_len = sequence.len();
        let mut counter = PairCounter::new(sequence);

        if let Some(max) = counter.max_token() {
            if next_id <= max {
                return Err(TokenizerError::InvalidConfig(format!(
                    "first merge ID {} must exceed the largest token {}",
                    next_id, max
                )));
            }
        }
        let mut merges = MergeMap::with_capacity(num_merges.min(initial_len));
        let mut stop_reason = StopReason::MergeLimit;
        let mut iterations = 0;

        log::info!(
            "training up to {} merges over {} tokens, first ID {}",
            num_merges,
            initial_len,
            next_id
        );

        while iterations < num_merges {
            let pair_counts = counter.count_pairs();
            let candidate = match most_frequent(&pair_counts) {
                Some(c) => c,
                None => {
                    stop_reason = StopReason::PairsExhausted;
                    break;
                }
            };

            let id = match merges.get(candidate.pair) {
                Some(id) => id,
                None => {
                    let id = merges.insert(candidate.pair, next_id)?;
                    next_id = next_id.checked_add(1).ok_or_else(|| {
                        TokenizerError::InvalidConfig("token ID space exhausted".to_string())
                    })?;
                    id
                }
            };

            counter.merge_pair(candidate.pair, id);

            let step = MergeStep {
                iteration: iterations,
                pair: candidate.pair,
                count: candidate.count,
                id,
                sequence_len: counter.len(),
            };
            iterations += 1;

            log::debug!(
                "merge {}: {:?} x{} -> {} ({} tokens left)",
                step.iteration,
                step.pair,
                step.count,
                step.id,
                step.sequence_len
            );

            if observer(&step).is_break() {
                stop_reason = StopReason::Cancelled;
                break;
            }
        }

        let stats = TrainingStats {
            merges_requested: num_merges,
            merges_learned: merges.len(),
            iterations,
            initial_len,
            final_len: counter.len(),
            stop_reason,
        };

        log::info!(
            "training stopped ({:?}): {} of {} merges, {} -> {} tokens",
            stats.stop_reason,
            stats.merges_learned,
            stats.merges_requested,
            stats.initial_len,
            stats.final_len
        );

        Ok(TrainingOutput {
            sequence: counter.into_sequence(),
            merges,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpair_core::MergeDecoder;

    fn bytes(text: &str) -> Vec<TokenId> {
        text.bytes().map(TokenId::from).collect()
    }

    #[test]
    fn test_basic_training() {
        let trainer = BpeTrainer::with_num_merges(3);
        let output = trainer.train(bytes("aaabdaaabac")).unwrap();

        assert_eq!(output.stats.merges_learned, 3);
        assert_eq!(output.stats.stop_reason, StopReason::MergeLimit);
        assert!(output.sequence.len() < 11);

        let decoded = MergeDecoder::new(&output.merges).decode(&output.sequence).unwrap();
        assert_eq!(decoded, "aaabdaaabac");
    }

    #[test]
    fn test_first_merge_is_most_frequent_pair() {
        let trainer = BpeTrainer::with_num_merges(1);
        let output = trainer.train(bytes("ab[SEP]ab")).unwrap();

        // 'b' is the largest byte, so the first merge ID is 99
        let first_id = BpeTrainer::initial_id(&bytes("ab[SEP]ab"));
        assert_eq!(first_id, u32::from(b'b') + 1);
        assert_eq!(
            output.merges.triples().collect::<Vec<_>>(),
            vec![(97, 98, first_id)]
        );
        assert_eq!(output.sequence.len(), 7);
    }

    #[test]
    fn test_ids_increase_from_max_byte() {
        let sequence = bytes("the cat sat on the mat");
        let max = *sequence.iter().max().unwrap();
        let output = BpeTrainer::with_num_merges(10).train(sequence).unwrap();

        let mut previous = max;
        for merge in &output.merges {
            assert!(merge.id > previous);
            previous = merge.id;
        }
        assert_eq!(output.merges.first_id(), Some(max + 1));
    }

    #[test]
    fn test_early_termination() {
        let output = BpeTrainer::with_num_merges(1_000)
            .train(bytes("hi"))
            .unwrap();

        assert_eq!(output.stats.merges_learned, 1);
        assert_eq!(output.stats.iterations, 1);
        assert_eq!(output.stats.stop_reason, StopReason::PairsExhausted);
        assert!(output.stats.is_short());
        assert_eq!(output.sequence.len(), 1);
    }

    #[test]
    fn test_empty_and_single_token() {
        let trainer = BpeTrainer::with_num_merges(10);

        let empty = trainer.train(Vec::new()).unwrap();
        assert!(empty.merges.is_empty());
        assert!(empty.sequence.is_empty());
        assert_eq!(empty.stats.stop_reason, StopReason::PairsExhausted);

        let single = trainer.train(vec![42]).unwrap();
        assert!(single.merges.is_empty());
        assert_eq!(single.sequence, vec![42]);
    }

    #[test]
    fn test_zero_merges() {
        let output = BpeTrainer::with_num_merges(0).train(bytes("abab")).unwrap();

        assert!(output.merges.is_empty());
        assert_eq!(output.sequence, bytes("abab"));
        assert_eq!(output.stats.stop_reason, StopReason::MergeLimit);
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        // (a,b), (b,c) and (c,a) all occur once; the smallest pair wins
        let output = BpeTrainer::with_num_merges(1).train(bytes("cab")).unwrap();
        let triples: Vec<_> = output.merges.triples().collect();
        assert_eq!(triples, vec![(97, 98, 100)]);
    }

    #[test]
    fn test_next_id_must_exceed_tokens() {
        let trainer = BpeTrainer::with_num_merges(5);
        assert!(matches!(
            trainer.train_from(bytes("abc"), 99),
            Err(TokenizerError::InvalidConfig(_))
        ));

        let output = trainer.train_from(bytes("abab"), 256).unwrap();
        assert_eq!(output.merges.first_id(), Some(256));
    }

    #[test]
    fn test_observer_can_cancel() {
        let mut seen = Vec::new();
        let output = BpeTrainer::with_num_merges(100)
            .train_with(bytes("abcabcabcabc"), 256, |step| {
                seen.push(step.id);
                if step.iteration == 1 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen, vec![256, 257]);
        assert_eq!(output.stats.iterations, 2);
        assert_eq!(output.stats.stop_reason, StopReason::Cancelled);
        assert_eq!(output.merges.len(), 2);
    }
}
