use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database payload names, probed in this order.
pub const DEFAULT_DATABASE_CANDIDATES: [&str; 3] =
    ["collection.anki21b", "collection.anki21", "collection.anki2"];

pub const DEFAULT_MEDIA_INDEX_NAME: &str = "media";

/// Extensions recognised by the heuristic media-index scan.
pub const DEFAULT_MEDIA_EXTENSIONS: [&str; 20] = [
    "jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "tif", "tiff", // images
    "mp3", "ogg", "oga", "wav", "m4a", "flac", "opus", "spx", // audio
    "mp4", "webm", "mov", // video
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportConfig {
    pub database_candidates: Vec<String>,
    pub media_index_name: String,
    pub media_extensions: Vec<String>,
    /// Upper bound on cached media entries; 0 is treated as 1.
    pub media_cache_capacity: usize,
    /// Parent for the extraction working directory. `None` uses the OS temp dir.
    pub work_dir: Option<PathBuf>,
    /// Emit a `ReadingCards` event every this many rows.
    pub card_progress_interval: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            database_candidates: DEFAULT_DATABASE_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            media_index_name: DEFAULT_MEDIA_INDEX_NAME.to_string(),
            media_extensions: DEFAULT_MEDIA_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            media_cache_capacity: 4096,
            work_dir: None,
            card_progress_interval: 500,
        }
    }
}
