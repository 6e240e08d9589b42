//! Best-effort filename recovery from the binary media index.
//!
//! Current-generation archives store the index as a protobuf message that is
//! not decoded here. Filenames are recovered by pattern and numbered in order
//! of appearance, which only matches the real storage keys when the encoder
//! wrote entries in key order. New archive generations may break this.

use super::index::MediaIndex;
use crate::types::errors::{ImportError, ImportResult};
use regex::bytes::Regex;

#[derive(Debug, Clone)]
pub struct MediaScanner {
    pattern: Regex,
}

impl MediaScanner {
    pub fn new(extensions: &[String]) -> ImportResult<Self> {
        let alternation = extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        if alternation.is_empty() {
            return Err(ImportError::Config(
                "mediaExtensions must list at least one extension".to_string(),
            ));
        }

        // Control bytes, quotes and path separators cannot be part of a stored
        // filename. Invalid UTF-8 never matches a Unicode class.
        let pattern = format!(r#"(?i)[^\x00-\x1F\x7F/\\"]+?\.(?:{alternation})\b"#);
        let pattern = Regex::new(&pattern)
            .map_err(|e| ImportError::Config(format!("Invalid media extension pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Assign keys "0", "1", ... to filename-shaped substrings in scan order.
    pub fn scan(&self, bytes: &[u8]) -> MediaIndex {
        self.pattern
            .find_iter(bytes)
            .filter_map(|m| std::str::from_utf8(strip_length_prefix(m.as_bytes())).ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .enumerate()
            .map(|(i, name)| (i.to_string(), name.to_string()))
            .collect()
    }
}

/// Names are length-delimited; a length of 32..=126 is a printable byte and
/// gets swallowed by the match. Drop it when it equals the remaining length.
fn strip_length_prefix(matched: &[u8]) -> &[u8] {
    match matched.split_first() {
        Some((&len, rest)) if len as usize == rest.len() => rest,
        _ => matched,
    }
}
