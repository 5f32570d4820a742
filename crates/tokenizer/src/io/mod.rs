//! Export of training artifacts.
//!
//! Trained corpora can be written out as JSON or as a tab-separated merge
//! list for inspection. Nothing here reads them back.

pub mod format;
pub mod save;

pub use format::{SerializedArtifacts, SerializedStats};
pub use save::ArtifactSaver;
