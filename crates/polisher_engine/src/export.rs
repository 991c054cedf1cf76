use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ResultEnvelope;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration block carried inside the JSON snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub complexity_level: String,
    pub task_type: String,
    pub language: String,
    pub target_models: Vec<String>,
}

/// Full session snapshot written by the JSON export: no server round-trip,
/// purely local serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub timestamp: String,
    pub input: String,
    pub configuration: ExportConfig,
    pub result: ResultEnvelope,
}

/// First 19 chars of an RFC 3339 timestamp with `:` and `-` stripped,
/// e.g. `2024-01-02T03:04:05.6Z` -> `20240102T030405`.
pub fn compact_timestamp(rfc3339: &str) -> String {
    rfc3339
        .chars()
        .take(19)
        .filter(|c| *c != ':' && *c != '-')
        .collect()
}

pub fn snapshot_filename(timestamp: &str) -> String {
    format!("prompt_optimization_{}.json", compact_timestamp(timestamp))
}

pub fn markdown_filename(timestamp: &str) -> String {
    format!("prompt_{}.md", compact_timestamp(timestamp))
}

/// Pretty-prints the snapshot and writes it atomically into `dir`.
pub fn write_snapshot(dir: &Path, snapshot: &ExportSnapshot) -> Result<PathBuf, ExportError> {
    let content = serde_json::to_string_pretty(snapshot)?;
    write_atomic(dir, &snapshot_filename(&snapshot.timestamp), &content)
}

/// Writes the raw optimized-prompt markdown into `dir`.
pub fn write_markdown(
    dir: &Path,
    timestamp: &str,
    markdown: &str,
) -> Result<PathBuf, ExportError> {
    write_atomic(dir, &markdown_filename(timestamp), markdown)
}

fn ensure_export_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Write content to `{dir}/{filename}` via a temp file and rename, so a
/// half-written export never lands under the final name.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    ensure_export_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
    Ok(target)
}
