//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::{CACHE_DIR_ENV, CacheConfig};
use crate::error::{IoError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// asset-cache: persist asset blobs and read them back through the virtual
/// file layer.
#[derive(Parser, Debug)]
#[command(name = "asset-cache")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory of the disk cache.
    ///
    /// Defaults to `.asset-cache` in the current directory.
    #[arg(short, long, env = CACHE_DIR_ENV, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// JSON file with disk cache settings (`root`, `force_overwrite`).
    ///
    /// `--cache-dir` overrides its root.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an asset file into the disk cache.
    Persist {
        /// Name (relative path) to store the asset under.
        name: String,

        /// File whose bytes are persisted.
        source: PathBuf,

        /// Overwrite an existing cached file.
        #[arg(short, long)]
        force: bool,
    },

    /// Check whether an asset exists in the disk cache.
    Exists {
        /// Name (relative path) of the asset.
        name: String,
    },

    /// Load assets into a virtual store and read one back sequentially.
    Read {
        /// Entry to open.
        name: String,

        /// Asset to load, as `path` or `name=path`. Repeatable; later loads
        /// of the same name shadow earlier ones.
        #[arg(short, long = "load", required = true)]
        load: Vec<String>,

        /// Seek offset applied after opening.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,

        /// Seek origin (start, current, end). `end` subtracts the offset
        /// from the size.
        #[arg(long, default_value = "start")]
        origin: String,

        /// Element size in bytes.
        #[arg(short, long, default_value = "1")]
        element_size: usize,

        /// Maximum number of elements to read (default: all remaining).
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Load assets into a virtual store and list its entries.
    #[command(name = "list", alias = "ls")]
    List {
        /// Asset to load, as `path` or `name=path`. Repeatable.
        #[arg(short, long = "load", required = true)]
        load: Vec<String>,
    },
}

impl Cli {
    /// Returns the disk cache configuration for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the `--config` file cannot be read or parsed.
    pub fn cache_config(&self) -> Result<CacheConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| IoError::ReadFailed {
                    path: path.to_string_lossy().to_string(),
                    reason: e.to_string(),
                })?;
                CacheConfig::from_json(&json)?
            }
            None => CacheConfig::default(),
        };
        if let Some(dir) = &self.cache_dir {
            config.root.clone_from(dir);
        }
        Ok(config)
    }
}
