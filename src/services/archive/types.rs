use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognised export archive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArchiveKind {
    /// Single-deck export (`.apkg`).
    Package,
    /// Full collection export (`.colpkg`).
    CollectionPackage,
}

impl ArchiveKind {
    /// Detect kind from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "apkg" => Some(Self::Package),
            "colpkg" => Some(Self::CollectionPackage),
            _ => None,
        }
    }
}

/// Result of an extraction operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub files_extracted: usize,
    pub entries_skipped: usize,
}
