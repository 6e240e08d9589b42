//! Export-archive unpacking.
//!
//! `.apkg` (single deck) and `.colpkg` (whole collection) share one zip layout
//! and are extracted identically.

mod extract;
mod types;

// Re-export public API
pub use extract::{extract_archive, extract_archive_bytes};
pub use types::{ArchiveKind, ExtractionSummary};

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
