//! Train command implementation.

use super::corpus::CorpusArgs;
use clap::Parser;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Write the encoded corpus, merges and stats as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the merges as tab-separated triples
    #[arg(long)]
    pub merges_tsv: Option<PathBuf>,
}

use anyhow::Result as AnyhowResult;
use blockpair_tokenizer::ArtifactSaver;
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let blocks = cmd.corpus.load_blocks()?;
    let mut tokenizer = cmd.corpus.tokenizer()?;

    let start = Instant::now();
    let trained = tokenizer.train(&blocks)?;
    let stats = &trained.stats;

    println!("Training completed in {:.2}s", start.elapsed().as_secs_f64());
    println!("  Blocks: {}", trained.block_count);
    println!(
        "  Merges: {} of {} requested ({:?})",
        stats.merges_learned, stats.merges_requested, stats.stop_reason
    );
    println!(
        "  Tokens: {} -> {} ({:.2}x)",
        stats.initial_len,
        stats.final_len,
        stats.compression_ratio()
    );
    let merge_stats = trained.merges.stats();
    if merge_stats.count > 0 {
        println!("  Merge IDs: {}..={}", merge_stats.min_id, merge_stats.max_id);
    }

    let saver = ArtifactSaver::new(&trained, tokenizer.framer().separator());
    if let Some(path) = &cmd.output {
        saver.save_json(path)?;
        println!("Artifacts saved to {}", path.display());
    }
    if let Some(path) = &cmd.merges_tsv {
        saver.save_merges_tsv(path)?;
        println!("Merges saved to {}", path.display());
    }

    Ok(())
}
