//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    OutputFormat, PersistReport, ReadReport, format_entries, format_exists, format_persist,
    format_read,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::SeekOrigin;
use crate::error::{CommandError, Result, StoreError};
use crate::io::read_asset;
use crate::store::VirtualStore;
use std::path::Path;
use tracing::info;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Persist {
            name,
            source,
            force,
        } => cmd_persist(cli, name, source, *force, format),
        Commands::Exists { name } => cmd_exists(cli, name, format),
        Commands::Read {
            name,
            load,
            offset,
            origin,
            element_size,
            count,
        } => cmd_read(
            name,
            load,
            *offset,
            origin,
            *element_size,
            *count,
            format,
        ),
        Commands::List { load } => cmd_list(load, format),
    }
}

/// Splits a `name=path` load spec; a bare path is named by its file name.
fn parse_load_spec(spec: &str) -> Result<(String, &Path)> {
    if let Some((name, path)) = spec.split_once('=')
        && !name.is_empty()
    {
        return Ok((name.to_string(), Path::new(path)));
    }

    let path = Path::new(spec);
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CommandError::InvalidArgument(format!("cannot derive a name from: {spec}")))?;
    Ok((name.to_string(), path))
}

/// Reads every load spec into memory, in order.
fn load_blobs(specs: &[String]) -> Result<Vec<(String, Vec<u8>)>> {
    specs
        .iter()
        .map(|spec| {
            let (name, path) = parse_load_spec(spec)?;
            let data = read_asset(path)?;
            Ok((name, data))
        })
        .collect()
}

/// Registers blobs by reference; later blobs shadow earlier same-named ones.
fn build_store(blobs: &[(String, Vec<u8>)]) -> Result<VirtualStore<'_>> {
    let mut store = VirtualStore::new();
    for (name, data) in blobs {
        store.persist(name, data.as_slice(), true)?;
    }
    Ok(store)
}

// ==================== Command Implementations ====================

fn cmd_persist(
    cli: &Cli,
    name: &str,
    source: &Path,
    force: bool,
    format: OutputFormat,
) -> Result<String> {
    let config = cli.cache_config()?;
    let cache = config.build()?;
    let data = read_asset(source)?;

    let outcome = cache.persist(name, &data, force || config.force_overwrite)?;
    let path = cache.path_for(name)?;
    info!(asset = name, outcome = outcome.as_str(), "persist command finished");

    let report = PersistReport {
        name: name.to_string(),
        path: path.to_string_lossy().to_string(),
        size: data.len(),
        outcome,
    };
    Ok(format_persist(&report, format))
}

fn cmd_exists(cli: &Cli, name: &str, format: OutputFormat) -> Result<String> {
    let cache = cli.cache_config()?.build()?;
    Ok(format_exists(name, cache.exists(name), format))
}

fn cmd_read(
    name: &str,
    load: &[String],
    offset: i64,
    origin: &str,
    element_size: usize,
    count: Option<usize>,
    format: OutputFormat,
) -> Result<String> {
    let origin = SeekOrigin::parse(origin)
        .ok_or_else(|| CommandError::InvalidArgument(format!("unknown seek origin: {origin}")))?;

    let blobs = load_blobs(load)?;
    let mut store = build_store(&blobs)?;

    let handle = store.open(name).ok_or_else(|| StoreError::NotFound {
        name: name.to_string(),
    })?;
    store.seek(handle, offset, origin)?;

    let remaining = store.entry(handle)?.remaining();
    let capacity = count.map_or(remaining, |c| c.saturating_mul(element_size).min(remaining));
    let mut dest = vec![0u8; capacity];
    let elements = store.read(&mut dest, element_size, count.unwrap_or(usize::MAX), handle)?;
    dest.truncate(elements * element_size);
    let cursor = store.tell(handle)?;
    store.close(handle)?;

    let report = ReadReport::new(name, element_size, elements, cursor, &dest);
    Ok(format_read(&report, format))
}

fn cmd_list(load: &[String], format: OutputFormat) -> Result<String> {
    let blobs = load_blobs(load)?;
    let store = build_store(&blobs)?;
    Ok(format_entries(&store.entries(), format))
}
