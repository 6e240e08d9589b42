use super::index::MediaIndex;
use crate::types::errors::{ImportError, ImportResult};
use lru::LruCache;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

/// Media files of an imported archive, addressed by logical filename.
///
/// Bytes are read from the extraction directory on first `load` and kept in
/// an LRU cache. When the store owns the extraction directory, dropping the
/// store deletes it, so paths from `locate` are only valid while the store
/// is alive.
pub struct MediaStore {
    /// Logical filename → storage key.
    keys_by_filename: HashMap<String, String>,
    filenames: Vec<String>,
    root: PathBuf,
    cache: Mutex<LruCache<String, Arc<[u8]>>>,
    disk_reads: AtomicUsize,
    _work_dir: Option<TempDir>,
}

impl MediaStore {
    /// Store over an extraction directory the caller keeps alive.
    pub fn new(index: &MediaIndex, root: impl Into<PathBuf>, cache_capacity: usize) -> Self {
        let mut keys_by_filename = HashMap::with_capacity(index.len());
        for (key, filename) in index.iter() {
            keys_by_filename.insert(filename.to_string(), key.to_string());
        }

        let mut filenames: Vec<String> = keys_by_filename.keys().cloned().collect();
        filenames.sort();

        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            keys_by_filename,
            filenames,
            root: root.into(),
            cache: Mutex::new(LruCache::new(capacity)),
            disk_reads: AtomicUsize::new(0),
            _work_dir: None,
        }
    }

    /// Store that takes ownership of the extraction directory and removes it on drop.
    pub fn owning(index: &MediaIndex, work_dir: TempDir, cache_capacity: usize) -> Self {
        let mut store = Self::new(index, work_dir.path(), cache_capacity);
        store._work_dir = Some(work_dir);
        store
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every logical filename in the index, sorted. No I/O.
    pub fn list_filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.keys_by_filename.contains_key(filename)
    }

    pub fn storage_key(&self, filename: &str) -> Option<&str> {
        self.keys_by_filename.get(filename).map(String::as_str)
    }

    /// On-disk path for `filename`, if it is indexed and was extracted.
    pub fn locate(&self, filename: &str) -> Option<PathBuf> {
        let key = self.keys_by_filename.get(filename)?;
        let path = self.root.join(key);
        path.is_file().then_some(path)
    }

    /// Bytes for `filename`, read through the cache. `None` if unknown or unreadable.
    pub fn load(&self, filename: &str) -> Option<Arc<[u8]>> {
        if let Some(hit) = self.lock_cache().get(filename) {
            return Some(Arc::clone(hit));
        }

        let path = self.locate(filename)?;
        let bytes: Arc<[u8]> = match fs::read(&path) {
            Ok(bytes) => Arc::from(bytes),
            Err(e) => {
                log::warn!("Failed to read media {filename} (non-fatal): {e}");
                return None;
            }
        };
        self.disk_reads.fetch_add(1, Ordering::Relaxed);

        self.lock_cache().put(filename.to_string(), Arc::clone(&bytes));
        Some(bytes)
    }

    /// Stream `filename` to `destination` without touching the cache.
    /// Returns the number of bytes written.
    pub fn copy_to(&self, filename: &str, destination: &Path) -> ImportResult<u64> {
        let source = self
            .locate(filename)
            .ok_or_else(|| ImportError::MediaNotFound(filename.to_string()))?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut reader = fs::File::open(&source)?;
        let mut writer = fs::File::create(destination)?;
        let written = io::copy(&mut reader, &mut writer)?;
        Ok(written)
    }

    /// Drop every cached payload. `locate` and `copy_to` are unaffected.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn cached_count(&self) -> usize {
        self.lock_cache().len()
    }

    /// Number of payloads read from disk by `load` so far.
    pub fn disk_reads(&self) -> usize {
        self.disk_reads.load(Ordering::Relaxed)
    }

    fn lock_cache(&self) -> MutexGuard<'_, LruCache<String, Arc<[u8]>>> {
        // Entries are whole immutable payloads, so a poisoned cache is still consistent.
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for MediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStore")
            .field("root", &self.root)
            .field("files", &self.filenames.len())
            .field("owns_dir", &self._work_dir.is_some())
            .finish()
    }
}
