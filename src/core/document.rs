//! Reading documents and recognizer output from disk.
//!
//! Newline normalization replaces every `\n` with a single space.
//! The replacement keeps the character count unchanged, so spans
//! computed on either form of the text remain valid.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::RawMention;

/// Replace each newline with a space.
pub fn normalize_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

/// Read a UTF-8 document, optionally normalizing newlines.
pub fn load_document(path: impl AsRef<Path>, normalize: bool) -> Result<String> {
    let path = path.as_ref();
    let contents = read_with_path(path)?;

    tracing::debug!("Read document {:?} ({} bytes)", path, contents.len());

    if normalize {
        Ok(normalize_newlines(&contents))
    } else {
        Ok(contents)
    }
}

/// Parse a JSON array of `{raw_text, start_char, end_char}` objects.
///
/// Offsets are only checked for being integers here; negative or
/// out-of-range spans are reported per mention by the pipeline.
pub fn parse_mentions(json: &str) -> Result<Vec<RawMention>> {
    Ok(serde_json::from_str(json)?)
}

/// Read recognizer output from a JSON file.
pub fn load_mentions(path: impl AsRef<Path>) -> Result<Vec<RawMention>> {
    let path = path.as_ref();
    let mentions = parse_mentions(&read_with_path(path)?)?;

    tracing::debug!("Read {} mentions from {:?}", mentions.len(), path);
    Ok(mentions)
}

/// Read names to canonicalize, one per line; blank lines are skipped.
pub fn load_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = read_with_path(path.as_ref())?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn read_with_path(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to read {path:?}: {e}")).into())
}
