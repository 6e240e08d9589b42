//! Media index decoding and lazy, cache-backed media access.

mod index;
mod scan;
mod store;

pub use index::{decode_media_index, probe_json_index, resolve_media_index, MediaIndex};
pub use scan::MediaScanner;
pub use store::MediaStore;

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod index_tests;

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;
