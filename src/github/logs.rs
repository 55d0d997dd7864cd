//! Log archive extraction.
//!
//! GitHub serves a run's logs as one zip bundle of per-job/per-step text
//! files. The archive is read entirely in memory - no temp files.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};

use super::types::LogFile;

/// Extract every entry of a zip archive into named text blobs.
///
/// Entries are decoded tolerantly: invalid UTF-8 never fails the fetch.
pub fn extract_log_archive(bytes: &[u8]) -> Result<Vec<LogFile>> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("Failed to open log archive")?;

    let mut files = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read log archive entry {}", index))?;

        if entry.is_dir() {
            continue;
        }

        let mut raw = Vec::new();
        entry
            .read_to_end(&mut raw)
            .with_context(|| format!("Failed to decompress {}", entry.name()))?;

        files.push(LogFile {
            name: entry.name().to_string(),
            content: decode_dropping_invalid(&raw),
        });
    }

    Ok(files)
}

/// Decode bytes as UTF-8, dropping invalid sequences outright.
fn decode_dropping_invalid(raw: &[u8]) -> String {
    let mut text = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
