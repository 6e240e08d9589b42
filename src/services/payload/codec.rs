//! Signatures and decompression for archive payloads.
//!
//! Current-generation archives store both the database and the media index as
//! zstd frames; older generations store them raw.

use crate::types::errors::{ImportError, ImportResult};
use log::trace;

/// Leading bytes of the SQLite header string `"SQLite format 3\0"`.
pub const SQLITE_MAGIC: &[u8; 6] = b"SQLite";

/// zstd frame magic number, little-endian `0xFD2FB528`.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

pub fn is_sqlite(bytes: &[u8]) -> bool {
    bytes.starts_with(SQLITE_MAGIC)
}

pub fn is_zstd(bytes: &[u8]) -> bool {
    bytes.starts_with(&ZSTD_MAGIC)
}

/// Decompress a complete zstd stream (one or more frames).
pub fn decompress_zstd(payload: &[u8]) -> ImportResult<Vec<u8>> {
    trace!("Decompressing zstd payload: {} bytes", payload.len());
    zstd::stream::decode_all(payload)
        .map_err(|e| ImportError::DecompressionFailed(format!("zstd: {e}")))
}
