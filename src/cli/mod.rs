//! CLI layer for asset-cache.
//!
//! Provides the command-line interface using clap, with commands for
//! persisting assets to the disk cache and reading them back through a
//! virtual store.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
