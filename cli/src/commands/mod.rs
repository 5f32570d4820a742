//! CLI commands for the blockpair tool.

pub mod benchmark;
pub mod corpus;
pub mod train;
pub mod verify;

pub use benchmark::BenchmarkCommand;
pub use train::TrainCommand;
pub use verify::VerifyCommand;
