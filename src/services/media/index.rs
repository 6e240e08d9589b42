use super::scan::MediaScanner;
use crate::services::config::ImportConfig;
use crate::services::payload::{decompress_zstd, is_zstd};
use crate::types::errors::ImportResult;
use crate::types::probe::Probe;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Storage key (archive-internal file name) → logical media filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaIndex {
    entries: BTreeMap<String, String>,
}

impl MediaIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filename(&self, storage_key: &str) -> Option<&str> {
        self.entries.get(storage_key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for MediaIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Locate and decode the media index under `work_dir`.
///
/// A missing index is an empty index. A zstd-compressed index that fails to
/// decompress is fatal, since there is no other candidate to try.
pub fn resolve_media_index(work_dir: &Path, config: &ImportConfig) -> ImportResult<MediaIndex> {
    let path = work_dir.join(&config.media_index_name);
    if !path.is_file() {
        log::info!("Archive has no media index");
        return Ok(MediaIndex::default());
    }

    let mut bytes = fs::read(&path)?;
    if is_zstd(&bytes) {
        bytes = decompress_zstd(&bytes)?;
    }

    let scanner = MediaScanner::new(&config.media_extensions)?;
    let index = decode_media_index(&bytes, &scanner);
    log::info!("Media index lists {} file(s)", index.len());
    Ok(index)
}

/// JSON map first, heuristic filename scan second.
pub fn decode_media_index(bytes: &[u8], scanner: &MediaScanner) -> MediaIndex {
    match probe_json_index(bytes) {
        Probe::Matched(index) => index,
        Probe::Invalid(reason) => {
            log::warn!("Media index looks like JSON but did not parse (non-fatal): {reason}");
            scanner.scan(bytes)
        }
        Probe::NoMatch => {
            log::debug!("Media index is not JSON, using heuristic filename scan");
            scanner.scan(bytes)
        }
    }
}

/// `{"0": "cat.png", ...}` as written by older generations.
pub fn probe_json_index(bytes: &[u8]) -> Probe<MediaIndex> {
    let looks_like_json = bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');
    if !looks_like_json {
        return Probe::NoMatch;
    }

    match serde_json::from_slice::<BTreeMap<String, String>>(bytes) {
        Ok(entries) => Probe::Matched(MediaIndex { entries }),
        Err(e) => Probe::Invalid(e.to_string()),
    }
}
