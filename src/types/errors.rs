use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure of an import, identifying the stage that failed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),
    #[error("No valid collection database found in archive")]
    DatabaseNotFound,
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Media not found: {0}")]
    MediaNotFound(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ImportError {
    fn from(error: std::io::Error) -> Self {
        ImportError::Io(error.to_string())
    }
}

impl From<sqlx::Error> for ImportError {
    fn from(error: sqlx::Error) -> Self {
        ImportError::Schema(error.to_string())
    }
}

impl Serialize for ImportError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
