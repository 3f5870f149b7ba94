//! TeX file cache core - shared types.
//!
//! Request keys, memoized resolutions, configuration and the error type
//! shared by the runtime and the HTTP server.

pub mod config;
pub mod error;
pub mod request;
pub mod resolution;

// Re-export commonly used types
pub use config::{CacheConfig, LogLevel, ResolverBackend, ResolverConfig, ServerConfig};
pub use error::{FetchError, Result};
pub use request::{sanitize_filename, Category, RequestKey};
pub use resolution::Resolution;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
