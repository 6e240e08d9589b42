//! Detection and decompression of the collection database payload.

pub mod codec;
mod resolver;

pub use codec::{decompress_zstd, is_sqlite, is_zstd, SQLITE_MAGIC, ZSTD_MAGIC};
pub use resolver::{probe_payload, resolve_database, RESOLVED_DATABASE_NAME};

#[cfg(test)]
#[path = "tests/payload_tests.rs"]
mod tests;
