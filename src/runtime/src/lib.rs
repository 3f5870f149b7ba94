//! TeX file cache runtime.
//!
//! Resolves logical TeX file requests through a pluggable resolver and
//! serves their bytes through two cache tiers: an unbounded memo of
//! resolution outcomes and a bounded LRU cache of file contents.

pub mod cache;
pub mod lookup;
pub mod resolver;

// Re-export common types
pub use cache::{ByteCache, ByteCacheStats, ResolutionCache};
pub use lookup::{LookupService, LookupStats};
pub use resolver::{KpseFormat, KpsewhichResolver, Resolver, SearchPathResolver, StaticResolver};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
