pub mod models;

pub use models::*;

use crate::types::errors::{ImportError, ImportResult};
use std::path::{Path, PathBuf};

pub const ENV_WORK_DIR: &str = "ANKI_IMPORT_WORK_DIR";
pub const ENV_CACHE_CAPACITY: &str = "ANKI_IMPORT_CACHE_CAPACITY";

impl ImportConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> ImportResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> ImportResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ImportError::Config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `.env` / process environment.
    pub fn from_env() -> ImportResult<Self> {
        let _ = dotenvy::dotenv(); // Try to load .env, ignore if missing
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F) -> ImportResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_WORK_DIR).filter(|v| !v.trim().is_empty()) {
            self.work_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_CACHE_CAPACITY) {
            self.media_cache_capacity = raw.trim().parse().map_err(|e| {
                ImportError::Config(format!("{ENV_CACHE_CAPACITY} must be a number: {e}"))
            })?;
        }
        self.validate()
    }

    pub fn validate(&self) -> ImportResult<()> {
        if self.database_candidates.is_empty() {
            return Err(ImportError::Config(
                "databaseCandidates must not be empty".to_string(),
            ));
        }
        if self.media_index_name.trim().is_empty() {
            return Err(ImportError::Config(
                "mediaIndexName must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
