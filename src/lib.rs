//! Importer for Anki export archives (`.apkg`, `.colpkg`).
//!
//! The archive is unpacked into a private working directory, the collection
//! database is located and decompressed when needed, decks and cards are read
//! from whichever schema generation is present, and media is exposed lazily
//! through [`MediaStore`].

pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use database::models::{Card, Deck};
pub use services::collections::{Collection, DeckNode};
pub use services::config::ImportConfig;
pub use services::importer::{import_bytes, import_file, import_reader};
pub use services::media::{MediaIndex, MediaStore};
pub use services::render::{render_json, render_markdown, RenderFormat};
pub use types::{ImportError, ImportProgress, ImportResult};
