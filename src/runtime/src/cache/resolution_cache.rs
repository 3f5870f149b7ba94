//! Unbounded cache from request key to resolution outcome.
//!
//! Entries live for the whole process, including "not found" outcomes.
//! Writes are atomic per key; concurrent writers of the same key are not
//! deduplicated and the last write wins.

use std::sync::Arc;

use dashmap::DashMap;
use texfetch_core::{RequestKey, Resolution};

/// Process-lifetime memo of resolution outcomes.
#[derive(Default)]
pub struct ResolutionCache {
    entries: DashMap<RequestKey, Arc<Resolution>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored resolution. No side effects.
    pub fn get(&self, key: &RequestKey) -> Option<Arc<Resolution>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Insert or overwrite the resolution for `key`.
    pub fn put(&self, key: RequestKey, resolution: Arc<Resolution>) {
        self.entries.insert(key, resolution);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::path::PathBuf;
    use texfetch_core::Category;

    #[test]
    fn test_get_miss() {
        let cache = ResolutionCache::new();
        assert!(cache.get(&RequestKey::new(Category::Xetex, 26, "a.tex")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_and_get() {
        let cache = ResolutionCache::new();
        let key = RequestKey::new(Category::Pdftex, 3, "cmr10.tfm");
        let resolution = Arc::new(Resolution::found(
            "/texmf/fonts/tfm/cmr10.tfm",
            Bytes::from_static(b"tfm"),
        ));

        cache.put(key.clone(), resolution.clone());

        let cached = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&cached, &resolution));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_not_found_is_stored() {
        let cache = ResolutionCache::new();
        let key = RequestKey::new(Category::Xetex, 1, "missing.tfm");
        cache.put(key.clone(), Arc::new(Resolution::not_found(None)));

        let cached = cache.get(&key).unwrap();
        assert!(!cached.exists());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = ResolutionCache::new();
        let key = RequestKey::new(Category::Xetex, 26, "a.tex");

        cache.put(key.clone(), Arc::new(Resolution::not_found(None)));
        cache.put(
            key.clone(),
            Arc::new(Resolution::found(PathBuf::from("a.tex"), Bytes::from_static(b"x"))),
        );

        assert!(cache.get(&key).unwrap().exists());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_differ_by_every_component() {
        let cache = ResolutionCache::new();
        cache.put(
            RequestKey::new(Category::Xetex, 26, "a.tex"),
            Arc::new(Resolution::not_found(None)),
        );

        assert!(cache.get(&RequestKey::new(Category::Pdftex, 26, "a.tex")).is_none());
        assert!(cache.get(&RequestKey::new(Category::Xetex, 27, "a.tex")).is_none());
        assert!(cache.get(&RequestKey::new(Category::Xetex, 26, "b.tex")).is_none());
    }
}
