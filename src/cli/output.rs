//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::EntryInfo;
use crate::error::Error;
use crate::store::PersistOutcome;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Result of a `persist` command.
#[derive(Debug, Clone, Serialize)]
pub struct PersistReport {
    /// Name the asset was persisted under.
    pub name: String,
    /// Path written (or left alone).
    pub path: String,
    /// Bytes in the source file.
    pub size: usize,
    /// Whether the file was written or kept.
    pub outcome: PersistOutcome,
}

/// Result of a `read` command.
#[derive(Debug, Clone, Serialize)]
pub struct ReadReport {
    /// Entry that was read.
    pub name: String,
    /// Element size requested.
    pub element_size: usize,
    /// Whole elements read.
    pub elements: usize,
    /// Cursor after the read.
    pub cursor: i64,
    /// Bytes read, hex encoded.
    pub hex: String,
    /// Bytes read, lossily decoded as UTF-8.
    pub text: String,
}

impl ReadReport {
    /// Builds a report from the bytes read.
    #[must_use]
    pub fn new(name: &str, element_size: usize, elements: usize, cursor: i64, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            element_size,
            elements,
            cursor,
            hex: to_hex(bytes),
            text: String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Formats a persist result.
#[must_use]
pub fn format_persist(report: &PersistReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "{} {} ({}) -> {}\n",
            capitalize(report.outcome.as_str()),
            report.name,
            format_size(report.size),
            report.path
        ),
        OutputFormat::Json => format_json(report),
    }
}

/// Formats an existence check.
#[must_use]
pub fn format_exists(name: &str, exists: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if exists {
                format!("{name}: exists\n")
            } else {
                format!("{name}: not found\n")
            }
        }
        OutputFormat::Json => format_json(&serde_json::json!({
            "name": name,
            "exists": exists,
        })),
    }
}

/// Formats a read result.
///
/// Text output is the raw (lossily decoded) content so it can be piped.
#[must_use]
pub fn format_read(report: &ReadReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => report.text.clone(),
        OutputFormat::Json => format_json(report),
    }
}

/// Formats an entry listing.
#[must_use]
pub fn format_entries(entries: &[EntryInfo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_entries_text(entries),
        OutputFormat::Json => format_json(&entries),
    }
}

fn format_entries_text(entries: &[EntryInfo]) -> String {
    if entries.is_empty() {
        return "No entries.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Entries (newest first):\n");
    let _ = writeln!(output, "{:<32} {:>12} Status", "Name", "Size");
    output.push_str(&"-".repeat(55));
    output.push('\n');

    for entry in entries {
        let _ = writeln!(
            output,
            "{:<32} {:>12} {}",
            entry.name,
            format_size(entry.size),
            if entry.shadowed { "shadowed" } else { "visible" }
        );
    }

    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({
            "success": false,
            "error": error.to_string(),
        })),
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
