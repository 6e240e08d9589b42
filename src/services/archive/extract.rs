use super::types::ExtractionSummary;
use crate::types::errors::{ImportError, ImportResult};
use std::fs;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

/// Extract every entry of an in-memory archive under `dest_path`.
pub fn extract_archive_bytes(bytes: &[u8], dest_path: &Path) -> ImportResult<ExtractionSummary> {
    extract_archive(Cursor::new(bytes), dest_path)
}

/// Extract every entry of a zip container to `dest_path/<entry-path>`.
///
/// Directory markers, unreadable entries and entries whose name would escape
/// `dest_path` are skipped. The caller owns `dest_path` and its cleanup.
pub fn extract_archive<R: Read + Seek>(
    reader: R,
    dest_path: &Path,
) -> ImportResult<ExtractionSummary> {
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| ImportError::InvalidArchive(format!("Invalid or corrupt ZIP: {e}")))?;

    fs::create_dir_all(dest_path)?;

    let mut summary = ExtractionSummary::default();
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Skipping unreadable archive entry {i} (non-fatal): {e}");
                summary.entries_skipped += 1;
                continue;
            }
        };

        if entry.is_dir() {
            summary.entries_skipped += 1;
            continue;
        }

        let entry_path = match entry.enclosed_name() {
            Some(p) => p,
            None => {
                log::warn!("Skipping unsafe archive entry path: {}", entry.name());
                summary.entries_skipped += 1;
                continue;
            }
        };

        let output_path = dest_path.join(&entry_path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut outfile = fs::File::create(&output_path)?;
        if let Err(e) = io::copy(&mut entry, &mut outfile) {
            log::warn!(
                "Skipping corrupt archive entry {} (non-fatal): {e}",
                entry_path.display()
            );
            drop(outfile);
            let _ = fs::remove_file(&output_path);
            summary.entries_skipped += 1;
            continue;
        }
        summary.files_extracted += 1;
    }

    log::info!(
        "Extracted {} file(s) to {} ({} skipped)",
        summary.files_extracted,
        dest_path.display(),
        summary.entries_skipped
    );
    Ok(summary)
}
