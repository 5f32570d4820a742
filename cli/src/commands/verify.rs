//! Verify command implementation.

use super::corpus::CorpusArgs;
use clap::Parser;

/// Verify command arguments.
#[derive(Parser)]
pub struct VerifyCommand {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Print this many original/decoded block pairs
    #[arg(long, default_value_t = 0)]
    pub show: usize,
}

use anyhow::{bail, Result as AnyhowResult};

pub fn run(cmd: VerifyCommand) -> AnyhowResult<()> {
    let blocks = cmd.corpus.load_blocks()?;
    let mut tokenizer = cmd.corpus.tokenizer()?;

    let result = tokenizer.round_trip(&blocks)?;

    for (i, pair) in result.pairs.iter().take(cmd.show).enumerate() {
        println!("Original Block {}: {}", i, pair.original);
        println!("Decoded Block {}: {}", i, pair.decoded);
        println!("---");
    }

    let mismatches: Vec<usize> = result
        .pairs
        .iter()
        .enumerate()
        .filter(|(_, pair)| !pair.is_exact())
        .map(|(i, _)| i)
        .collect();

    println!(
        "{} blocks, {} merges, {} mismatches",
        blocks.len(),
        result.trained.merges.len(),
        mismatches.len()
    );

    if result.decoded_count != blocks.len() {
        bail!(
            "decoded {} blocks from {} originals; does a block contain {:?}?",
            result.decoded_count,
            blocks.len(),
            tokenizer.framer().separator()
        );
    }
    if let Some(first) = mismatches.first() {
        bail!("block {} did not survive the round trip", first);
    }

    Ok(())
}
