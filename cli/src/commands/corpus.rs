//! Corpus arguments shared by every command.

use anyhow::{Context, Result as AnyhowResult};
use blockpair_tokenizer::{CorpusFramer, Tokenizer, DEFAULT_SEPARATOR};
use clap::Args;
use std::path::PathBuf;

/// Where the corpus comes from and how to train on it.
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Text file with one block per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Maximum number of merges
    #[arg(short, long, default_value_t = 5_000)]
    pub num_merges: usize,

    /// Separator placed between blocks
    #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Only use the first N blocks
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Fail if a block contains the separator
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl CorpusArgs {
    /// Read the blocks from the input file.
    pub fn load_blocks(&self) -> AnyhowResult<Vec<String>> {
        let bytes = std::fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let mut blocks = CorpusFramer::blocks_from_bytes(&bytes)
            .with_context(|| format!("failed to parse {}", self.input.display()))?;

        if let Some(limit) = self.limit {
            blocks.truncate(limit);
        }

        log::info!(
            "loaded {} blocks ({} bytes) from {}",
            blocks.len(),
            bytes.len(),
            self.input.display()
        );
        Ok(blocks)
    }

    /// Build a tokenizer from the arguments.
    pub fn tokenizer(&self) -> AnyhowResult<Tokenizer> {
        Ok(Tokenizer::builder()
            .num_merges(self.num_merges)
            .separator(self.separator.clone())
            .strict_framing(self.strict)
            .build()?)
    }
}
