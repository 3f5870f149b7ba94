//! Resolve-once, serve-many lookup service.
//!
//! A lookup first consults the [`ResolutionCache`]. On a miss it resolves the
//! request (pass-through preamble files skip the resolver), checks that the
//! candidate is a regular file, pulls its bytes through the [`ByteCache`] and
//! stores the outcome. Stored outcomes are never refreshed: a file that
//! changes or disappears after its first lookup keeps being served from
//! memory, and a file that appears after a "not found" stays not found.
//!
//! Concurrent first lookups of the same key are not deduplicated. Each one
//! resolves and reads independently and the last store wins; outcomes for
//! one key are deterministic so this only costs duplicate work.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use texfetch_core::config::{CacheConfig, ServerConfig};
use texfetch_core::error::{FetchError, Result};
use texfetch_core::{RequestKey, Resolution};

use crate::cache::{ByteCache, ByteCacheStats, ResolutionCache};
use crate::resolver::{self, Resolver};

/// Point-in-time counters for a [`LookupService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupStats {
    /// Lookups answered from the resolution cache
    pub resolution_hits: u64,
    /// Lookups that had to resolve
    pub resolution_misses: u64,
    /// Calls made into the resolver backend
    pub resolver_calls: u64,
    /// Resolutions memoized in the resolution cache
    pub resolutions: usize,
    /// Byte cache counters
    pub byte_cache: ByteCacheStats,
}

/// Two-tier caching front end for a [`Resolver`].
pub struct LookupService {
    resolver: Arc<dyn Resolver>,
    resolutions: ResolutionCache,
    bytes: ByteCache,
    caching: bool,
    preamble_dir: PathBuf,
    resolution_hits: AtomicU64,
    resolution_misses: AtomicU64,
    resolver_calls: AtomicU64,
}

impl LookupService {
    /// Create a service with fresh, empty caches.
    pub fn new(resolver: Arc<dyn Resolver>, cache: &CacheConfig) -> Result<Self> {
        Ok(Self {
            resolver,
            resolutions: ResolutionCache::new(),
            bytes: ByteCache::new(cache.byte_cache_capacity)?,
            caching: cache.enabled,
            preamble_dir: PathBuf::new(),
            resolution_hits: AtomicU64::new(0),
            resolution_misses: AtomicU64::new(0),
            resolver_calls: AtomicU64::new(0),
        })
    }

    /// Build the resolver and caches described by a server configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        config.validate()?;
        let resolver = resolver::from_config(&config.resolver);
        Ok(Self::new(resolver, &config.cache)?.with_preamble_dir(&config.resolver.preamble_dir))
    }

    /// Directory the pass-through preamble files are served from.
    /// Empty means the process working directory.
    pub fn with_preamble_dir(mut self, dir: &Path) -> Self {
        self.preamble_dir = dir.to_path_buf();
        self
    }

    /// Resolve `key` to a resolution, memoizing the outcome.
    ///
    /// "Not found" is an `Ok` value. A file that passes the existence check
    /// but cannot be read yields `FetchError::ReadError` and nothing is
    /// stored, so the next request for the key tries again.
    pub fn lookup(&self, key: &RequestKey) -> Result<Arc<Resolution>> {
        if !self.caching {
            return self.resolve_fresh(key).map(Arc::new);
        }

        if let Some(cached) = self.resolutions.get(key) {
            self.resolution_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(cached);
        }
        self.resolution_misses.fetch_add(1, Ordering::Relaxed);

        let path = self.candidate_path(key)?;
        let resolution = match path {
            Some(path) if path.is_file() => {
                let data = self.bytes.get_or_load(&path)?;
                Resolution::found(path, data)
            }
            other => Resolution::not_found(other),
        };

        tracing::debug!(
            key = %key,
            exists = resolution.exists(),
            path = ?resolution.path(),
            "Memoized resolution"
        );

        let resolution = Arc::new(resolution);
        self.resolutions.put(key.clone(), Arc::clone(&resolution));
        Ok(resolution)
    }

    /// Uncached path: resolve and read from disk every time.
    fn resolve_fresh(&self, key: &RequestKey) -> Result<Resolution> {
        match self.candidate_path(key)? {
            Some(path) if path.is_file() => {
                let data = std::fs::read(&path).map_err(|source| FetchError::ReadError {
                    path: path.clone(),
                    source,
                })?;
                Ok(Resolution::found(path, Bytes::from(data)))
            }
            other => Ok(Resolution::not_found(other)),
        }
    }

    fn candidate_path(&self, key: &RequestKey) -> Result<Option<PathBuf>> {
        if key.is_pass_through() {
            return Ok(Some(self.preamble_dir.join(key.filename())));
        }

        self.resolver_calls.fetch_add(1, Ordering::Relaxed);
        let path = self
            .resolver
            .resolve(key.category(), key.selector(), key.filename())?;
        if path.is_none() {
            tracing::debug!(key = %key, "Resolver found nothing");
        }
        Ok(path)
    }

    pub fn is_caching(&self) -> bool {
        self.caching
    }

    pub fn resolution_cache(&self) -> &ResolutionCache {
        &self.resolutions
    }

    pub fn byte_cache(&self) -> &ByteCache {
        &self.bytes
    }

    pub fn stats(&self) -> LookupStats {
        LookupStats {
            resolution_hits: self.resolution_hits.load(Ordering::Relaxed),
            resolution_misses: self.resolution_misses.load(Ordering::Relaxed),
            resolver_calls: self.resolver_calls.load(Ordering::Relaxed),
            resolutions: self.resolutions.len(),
            byte_cache: self.bytes.stats(),
        }
    }

    /// Log a stats snapshot at info level and return it.
    pub fn log_stats(&self) -> LookupStats {
        let stats = self.stats();
        tracing::info!(
            resolution_hits = stats.resolution_hits,
            resolution_misses = stats.resolution_misses,
            resolver_calls = stats.resolver_calls,
            resolutions = stats.resolutions,
            byte_cache_hits = stats.byte_cache.hits,
            byte_cache_misses = stats.byte_cache.misses,
            byte_cache_evictions = stats.byte_cache.evictions,
            byte_cache_entries = stats.byte_cache.entries,
            byte_cache_capacity = stats.byte_cache.capacity,
            "Lookup statistics"
        );
        stats
    }
}
