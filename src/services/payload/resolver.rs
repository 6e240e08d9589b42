use super::codec::{decompress_zstd, is_sqlite, is_zstd};
use crate::types::errors::{ImportError, ImportResult};
use crate::types::probe::Probe;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the validated database bytes are written inside the working directory.
pub const RESOLVED_DATABASE_NAME: &str = ".resolved-collection.sqlite";

/// Classify one candidate's bytes.
///
/// Plain SQLite is returned unchanged. A zstd frame counts only if it
/// decompresses to SQLite; a failed decompression is `Invalid`, not an error.
pub fn probe_payload(bytes: Vec<u8>) -> Probe<Vec<u8>> {
    if is_sqlite(&bytes) {
        return Probe::Matched(bytes);
    }
    if !is_zstd(&bytes) {
        return Probe::NoMatch;
    }

    match decompress_zstd(&bytes) {
        Ok(decompressed) if is_sqlite(&decompressed) => Probe::Matched(decompressed),
        Ok(_) => Probe::Invalid("decompressed payload is not a SQLite database".to_string()),
        Err(e) => Probe::Invalid(e.to_string()),
    }
}

/// Probe `candidates` in order under `work_dir` and write the first valid
/// payload to [`RESOLVED_DATABASE_NAME`]. Each candidate is tried once.
pub fn resolve_database(work_dir: &Path, candidates: &[String]) -> ImportResult<PathBuf> {
    for name in candidates {
        let candidate = work_dir.join(name);
        if !candidate.is_file() {
            continue;
        }

        let bytes = fs::read(&candidate)?;
        match probe_payload(bytes) {
            Probe::Matched(payload) => {
                let resolved = work_dir.join(RESOLVED_DATABASE_NAME);
                fs::write(&resolved, &payload)?;
                log::info!(
                    "Resolved collection database from {name} ({} bytes)",
                    payload.len()
                );
                return Ok(resolved);
            }
            Probe::Invalid(reason) => {
                log::warn!("Candidate {name} rejected (non-fatal): {reason}");
            }
            Probe::NoMatch => {
                log::debug!("Candidate {name} has no recognised signature");
            }
        }
    }

    Err(ImportError::DatabaseNotFound)
}
