//! Bounded in-memory cache of file contents keyed by resolved path.
//!
//! Capacity is an entry count, not a byte budget. When a new path is loaded
//! into a full cache the least-recently-used entry is dropped. Buffers are
//! reference counted, so bytes already handed out stay valid after eviction.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use texfetch_core::error::{FetchError, Result};

/// Point-in-time counters for a [`ByteCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteCacheStats {
    /// Lookups served from memory
    pub hits: u64,
    /// Lookups that read the file from disk
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Entries currently held
    pub entries: usize,
    /// Maximum number of entries
    pub capacity: usize,
}

/// LRU cache from resolved path to file bytes.
pub struct ByteCache {
    entries: Mutex<LruCache<PathBuf, Bytes>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ByteCache {
    /// Create a cache holding at most `capacity` files.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            FetchError::ConfigError("Byte cache capacity must be greater than zero".to_string())
        })?;

        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        })
    }

    /// Return the bytes of `path`, reading the file on a miss.
    ///
    /// A hit marks the entry most-recently-used. A miss reads the whole file
    /// outside the lock and then inserts it, evicting the least-recently-used
    /// entry if the cache is full. Two threads missing on the same path both
    /// read it; the later insert replaces the earlier one.
    pub fn get_or_load(&self, path: &Path) -> Result<Bytes> {
        if let Some(data) = self.get(path) {
            return Ok(data);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(path = %path.display(), "Byte cache miss");

        let data = std::fs::read(path)
            .map(Bytes::from)
            .map_err(|source| FetchError::ReadError {
                path: path.to_path_buf(),
                source,
            })?;

        let evicted = self.entries.lock().push(path.to_path_buf(), data.clone());
        if let Some((evicted_path, _)) = evicted {
            if evicted_path != path {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(path = %evicted_path.display(), "Evicted cached file");
            }
        }

        Ok(data)
    }

    /// Cached bytes for `path`, marking it most-recently-used. No disk access.
    pub fn get(&self, path: &Path) -> Option<Bytes> {
        let data = self.entries.lock().get(path).cloned();
        if data.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        data
    }

    /// Whether `path` is cached. Does not touch recency.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> ByteCacheStats {
        let (entries, capacity) = {
            let guard = self.entries.lock();
            (guard.len(), guard.cap().get())
        };
        ByteCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn write_files(dir: &Path, files: &[(&str, &[u8])]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.join(name);
                std::fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result = ByteCache::new(0);
        assert!(matches!(result, Err(FetchError::ConfigError(_))));
    }

    #[test]
    fn test_get_or_load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("cmr10.tfm", b"\x00\x01tfm")]);
        let cache = ByteCache::new(4).unwrap();

        let data = cache.get_or_load(&paths[0]).unwrap();
        assert_eq!(data.as_ref(), b"\x00\x01tfm");
        assert!(cache.contains(&paths[0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hit_does_not_reread_disk() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("a.sty", b"original")]);
        let cache = ByteCache::new(4).unwrap();

        cache.get_or_load(&paths[0]).unwrap();
        std::fs::write(&paths[0], b"changed on disk").unwrap();

        let data = cache.get_or_load(&paths[0]).unwrap();
        assert_eq!(data.as_ref(), b"original");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_empty_file() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("empty.tex", b"")]);
        let cache = ByteCache::new(1).unwrap();

        let data = cache.get_or_load(&paths[0]).unwrap();
        assert!(data.is_empty());
        assert!(cache.contains(&paths[0]));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let cache = ByteCache::new(2).unwrap();
        let missing = tmp.path().join("missing.tfm");

        let err = cache.get_or_load(&missing).unwrap_err();
        match err {
            FetchError::ReadError { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_evicts_least_recently_loaded() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(
            tmp.path(),
            &[("a", b"a"), ("b", b"b"), ("c", b"c"), ("d", b"d")],
        );
        let cache = ByteCache::new(3).unwrap();

        for path in &paths[..3] {
            cache.get_or_load(path).unwrap();
        }
        cache.get_or_load(&paths[3]).unwrap();

        assert!(!cache.contains(&paths[0]));
        assert!(cache.contains(&paths[1]));
        assert!(cache.contains(&paths[2]));
        assert!(cache.contains(&paths[3]));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_access_protects_from_eviction() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(
            tmp.path(),
            &[("a", b"a"), ("b", b"b"), ("c", b"c"), ("d", b"d")],
        );
        let cache = ByteCache::new(3).unwrap();

        for path in &paths[..3] {
            cache.get_or_load(path).unwrap();
        }
        // Touch "a" so "b" becomes the oldest
        cache.get_or_load(&paths[0]).unwrap();
        cache.get_or_load(&paths[3]).unwrap();

        assert!(cache.contains(&paths[0]));
        assert!(!cache.contains(&paths[1]));
        assert!(cache.contains(&paths[2]));
        assert!(cache.contains(&paths[3]));
    }

    #[test]
    fn test_contains_does_not_refresh_recency() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("a", b"a"), ("b", b"b"), ("c", b"c")]);
        let cache = ByteCache::new(2).unwrap();

        cache.get_or_load(&paths[0]).unwrap();
        cache.get_or_load(&paths[1]).unwrap();
        assert!(cache.contains(&paths[0]));
        cache.get_or_load(&paths[2]).unwrap();

        assert!(!cache.contains(&paths[0]));
        assert!(cache.contains(&paths[1]));
    }

    #[test]
    fn test_evicted_bytes_remain_valid() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("a", b"first"), ("b", b"second")]);
        let cache = ByteCache::new(1).unwrap();

        let held = cache.get_or_load(&paths[0]).unwrap();
        cache.get_or_load(&paths[1]).unwrap();

        assert!(!cache.contains(&paths[0]));
        assert_eq!(held.as_ref(), b"first");
    }

    #[test]
    fn test_stats_snapshot() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("a", b"a"), ("b", b"b")]);
        let cache = ByteCache::new(1).unwrap();

        cache.get_or_load(&paths[0]).unwrap();
        cache.get_or_load(&paths[0]).unwrap();
        cache.get_or_load(&paths[1]).unwrap();

        let stats = cache.stats();
        assert_eq!(
            stats,
            ByteCacheStats {
                hits: 1,
                misses: 2,
                evictions: 1,
                entries: 1,
                capacity: 1,
            }
        );
    }

    #[test]
    fn test_concurrent_loads_of_same_path() {
        let tmp = TempDir::new().unwrap();
        let paths = write_files(tmp.path(), &[("shared.fmt", b"format data")]);
        let cache = Arc::new(ByteCache::new(8).unwrap());
        let path = Arc::new(paths[0].clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let path = path.clone();
                std::thread::spawn(move || cache.get_or_load(&path).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_ref(), b"format data");
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }
}
