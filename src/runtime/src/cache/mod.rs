//! Cache module for resolve-once, serve-many lookups.
//!
//! Provides two caching layers:
//! - `ResolutionCache`: Unbounded memo from request key to resolution outcome
//! - `ByteCache`: Bounded LRU cache from resolved path to file bytes

pub mod byte_cache;
pub mod resolution_cache;

pub use byte_cache::{ByteCache, ByteCacheStats};
pub use resolution_cache::ResolutionCache;
