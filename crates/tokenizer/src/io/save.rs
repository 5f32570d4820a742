//! Save functionality for trained corpora.

use super::format::{SerializedArtifacts, SerializedStats};
use crate::tokenizer::TrainedCorpus;
use blockpair_core::{MergeMap, Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Artifact saver - writes a trained corpus to disk.
pub struct ArtifactSaver<'a> {
    /// The training result
    trained: &'a TrainedCorpus,
    /// Separator the corpus was joined with
    separator: &'a str,
}

impl<'a> ArtifactSaver<'a> {
    /// Create a new artifact saver.
    pub fn new(trained: &'a TrainedCorpus, separator: &'a str) -> Self {
        Self { trained, separator }
    }

    /// Save the encoded corpus, merges and stats as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_file(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })
    }

    /// Save the merges as `first<TAB>second<TAB>new_id` lines.
    pub fn save_merges_tsv(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(create_file(path)?);
        write_merges_tsv(&self.trained.merges, &mut writer)
            .and_then(|_| writer.flush())
            .map_err(|err| TokenizerError::Io {
                path: path.to_path_buf(),
                err,
            })
    }

    /// Serialize the trained corpus to a structure.
    pub fn serialize(&self) -> SerializedArtifacts<'_> {
        let stats = &self.trained.stats;

        SerializedArtifacts {
            version: env!("CARGO_PKG_VERSION").to_string(),
            separator: self.separator,
            block_count: self.trained.block_count,
            stats: SerializedStats {
                merges_requested: stats.merges_requested,
                merges_learned: stats.merges_learned,
                iterations: stats.iterations,
                initial_len: stats.initial_len,
                final_len: stats.final_len,
                stop_reason: format!("{:?}", stats.stop_reason),
            },
            merges: &self.trained.merges,
            encoded: &self.trained.encoded,
        }
    }
}

/// Write merges as tab-separated triples, one per line, in discovery order.
pub fn write_merges_tsv<W: Write>(merges: &MergeMap, writer: &mut W) -> std::io::Result<()> {
    for (first, second, id) in merges.triples() {
        writeln!(writer, "{}\t{}\t{}", first, second, id)?;
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| TokenizerError::Io {
            path: parent.to_path_buf(),
            err,
        })?;
    }

    File::create(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })
}
