//! File resolvers.
//!
//! A resolver maps `(category, selector, filename)` to a candidate path on
//! disk. Resolution may be slow (a filesystem search across a path list or
//! a subprocess), which is why [`crate::LookupService`] memoizes it.
//!
//! Backends:
//! - `KpsewhichResolver`: asks the kpathsea command-line front end
//! - `SearchPathResolver`: searches a fixed list of directories in-process
//! - `StaticResolver`: fixed table, for embedding and tests

pub mod format;
pub mod kpsewhich;
pub mod search_path;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use texfetch_core::config::{ResolverBackend, ResolverConfig};
use texfetch_core::error::Result;
use texfetch_core::request::{Category, RequestKey};

pub use format::KpseFormat;
pub use kpsewhich::KpsewhichResolver;
pub use search_path::SearchPathResolver;

/// Maps a logical request to a candidate path.
///
/// `Ok(None)` means "not found" and is a normal outcome. `Err` is reserved
/// for backend failures. Implementations block the calling thread.
pub trait Resolver: Send + Sync {
    fn resolve(&self, category: Category, selector: u32, filename: &str)
        -> Result<Option<PathBuf>>;
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve(
        &self,
        category: Category,
        selector: u32,
        filename: &str,
    ) -> Result<Option<PathBuf>> {
        (**self).resolve(category, selector, filename)
    }
}

/// Resolver backed by a fixed table of request keys.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    entries: HashMap<RequestKey, PathBuf>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: RequestKey, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(key, path.into());
        self
    }
}

impl Resolver for StaticResolver {
    fn resolve(
        &self,
        category: Category,
        selector: u32,
        filename: &str,
    ) -> Result<Option<PathBuf>> {
        let key = RequestKey::new(category, selector, filename);
        Ok(self.entries.get(&key).cloned())
    }
}

/// Build the resolver described by `config`.
pub fn from_config(config: &ResolverConfig) -> Arc<dyn Resolver> {
    match config.backend {
        ResolverBackend::Kpsewhich => Arc::new(KpsewhichResolver::new(&config.kpsewhich)),
        ResolverBackend::SearchPath => {
            Arc::new(SearchPathResolver::new(config.search_paths.as_slice()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver() {
        let resolver = StaticResolver::new().with_entry(
            RequestKey::new(Category::PdftexBitmap, 300, "cmr10"),
            "/fonts/cmr10.pk",
        );

        assert_eq!(
            resolver
                .resolve(Category::PdftexBitmap, 300, "cmr10")
                .unwrap(),
            Some(PathBuf::from("/fonts/cmr10.pk"))
        );
        assert_eq!(
            resolver
                .resolve(Category::PdftexBitmap, 600, "cmr10")
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_arc_resolver_delegates() {
        let resolver: Arc<dyn Resolver> = Arc::new(
            StaticResolver::new()
                .with_entry(RequestKey::new(Category::Xetex, 26, "a.tex"), "/t/a.tex"),
        );
        let shared = Arc::new(resolver);
        assert!(shared.resolve(Category::Xetex, 26, "a.tex").unwrap().is_some());
    }

    #[test]
    fn test_from_config_builds_backend() {
        let mut config = ResolverConfig {
            backend: ResolverBackend::SearchPath,
            search_paths: vec!["/nonexistent-texmf".to_string()],
            ..ResolverConfig::default()
        };
        let resolver = from_config(&config);
        assert_eq!(resolver.resolve(Category::Xetex, 26, "a.tex").unwrap(), None);

        config.backend = ResolverBackend::Kpsewhich;
        config.kpsewhich = PathBuf::from("/nonexistent/kpsewhich");
        let resolver = from_config(&config);
        assert!(resolver.resolve(Category::Xetex, 26, "a.tex").is_err());
    }
}
