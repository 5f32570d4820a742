//! Benchmark command implementation.

use super::corpus::CorpusArgs;
use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of iterations to run
    #[arg(long, default_value_t = 5)]
    pub iterations: usize,
}

use anyhow::Result as AnyhowResult;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let blocks = cmd.corpus.load_blocks()?;
    let iterations = cmd.iterations.max(1);

    println!("Benchmarking training...");
    println!("  Blocks: {}", blocks.len());
    println!("  Merges: {}", cmd.corpus.num_merges);
    println!("  Iterations: {}", iterations);
    println!();

    let mut merges_learned = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        let mut tokenizer = cmd.corpus.tokenizer()?;
        merges_learned = tokenizer.train(&blocks)?.merges.len();
    }
    let elapsed = start.elapsed();

    let avg_time_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_time_ms);
    println!(
        "  Throughput: {:.0} merges/s",
        merges_learned as f64 / (avg_time_ms / 1000.0).max(f64::EPSILON)
    );

    Ok(())
}
