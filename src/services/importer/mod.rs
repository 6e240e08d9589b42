//! The import pipeline: extract → resolve database → decks → cards → media.
//!
//! Every stage runs to completion before the next starts. Any structural
//! failure aborts the whole import and the working directory is removed.

use crate::database::{card_repo, deck_repo, CollectionDb};
use crate::services::archive::{extract_archive, ArchiveKind};
use crate::services::collections::Collection;
use crate::services::config::ImportConfig;
use crate::services::media::{resolve_media_index, MediaStore};
use crate::services::payload::resolve_database;
use crate::types::errors::{ImportError, ImportResult};
use crate::types::progress::ImportProgress;
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const WORK_DIR_PREFIX: &str = "anki-import-";

/// Import an `.apkg` / `.colpkg` file from disk.
pub async fn import_file<F>(
    path: &Path,
    config: &ImportConfig,
    on_progress: F,
) -> ImportResult<Collection>
where
    F: FnMut(ImportProgress),
{
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.to_path_buf()));
    }
    match ArchiveKind::from_path(path) {
        Some(kind) => log::info!("Importing {:?} from {}", kind, path.display()),
        None => log::warn!(
            "Unrecognised archive extension, attempting import anyway: {}",
            path.display()
        ),
    }

    let file = fs::File::open(path)?;
    import_reader(file, config, on_progress).await
}

/// Import an archive held in memory.
pub async fn import_bytes<F>(
    bytes: Vec<u8>,
    config: &ImportConfig,
    on_progress: F,
) -> ImportResult<Collection>
where
    F: FnMut(ImportProgress),
{
    import_reader(Cursor::new(bytes), config, on_progress).await
}

/// Run the full pipeline over any seekable archive source.
///
/// Progress callbacks run synchronously on the task driving this future.
pub async fn import_reader<R, F>(
    reader: R,
    config: &ImportConfig,
    mut on_progress: F,
) -> ImportResult<Collection>
where
    R: Read + Seek + Send + 'static,
    F: FnMut(ImportProgress),
{
    config.validate()?;
    let work_dir = create_work_dir(config)?;

    on_progress(ImportProgress::Extracting);
    let dest = work_dir.path().to_path_buf();
    let candidates = config.database_candidates.clone();
    let db_path = tokio::task::spawn_blocking(move || -> ImportResult<PathBuf> {
        extract_archive(reader, &dest)?;
        resolve_database(&dest, &candidates)
    })
    .await
    .map_err(|e| ImportError::Io(format!("Extraction task failed: {e}")))??;

    let mut db = CollectionDb::open(&db_path).await?;

    on_progress(ImportProgress::ReadingDecks);
    let decks = deck_repo::read_decks(db.conn()).await?;
    log::info!("Read {} deck(s)", decks.len());

    let total = card_repo::count_cards(db.conn()).await?;
    let interval = config.card_progress_interval.max(1);
    let cards = card_repo::read_all_cards(db.conn(), |scanned| {
        if scanned % interval == 0 && scanned < total {
            on_progress(ImportProgress::ReadingCards {
                current: scanned,
                total,
            });
        }
    })
    .await?;
    on_progress(ImportProgress::ReadingCards {
        current: total,
        total,
    });
    log::info!("Read {} card(s) from {} row(s)", cards.len(), total);

    db.close().await?;
    if let Err(e) = fs::remove_file(&db_path) {
        log::debug!("Could not remove resolved database copy (non-fatal): {e}");
    }

    on_progress(ImportProgress::ParsingMedia);
    let index = resolve_media_index(work_dir.path(), config)?;
    let media = MediaStore::owning(&index, work_dir, config.media_cache_capacity);

    Ok(Collection::new(decks, cards, Arc::new(media)))
}

fn create_work_dir(config: &ImportConfig) -> ImportResult<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(WORK_DIR_PREFIX);

    let dir = match &config.work_dir {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            builder.tempdir_in(parent)?
        }
        None => builder.tempdir()?,
    };
    log::debug!("Working directory: {}", dir.path().display());
    Ok(dir)
}

#[cfg(test)]
#[path = "tests/importer_tests.rs"]
mod tests;
