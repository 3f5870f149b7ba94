use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result};

/// Default number of files kept in the byte cache.
pub const DEFAULT_BYTE_CACHE_CAPACITY: usize = 30_000;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5001";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind: SocketAddr,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Resolver configuration
    pub resolver: ResolverConfig,

    /// Log level used when RUST_LOG is not set
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5001)),
            cache: CacheConfig::default(),
            resolver: ResolverConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: ServerConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.byte_cache_capacity == 0 {
            return Err(FetchError::ConfigError(
                "cache.byte_cache_capacity must be greater than zero".to_string(),
            ));
        }
        if self.resolver.backend == ResolverBackend::SearchPath
            && self.resolver.search_paths.is_empty()
        {
            return Err(FetchError::ConfigError(
                "resolver.search_paths must not be empty for the search_path backend"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, every lookup resolves and reads fresh and nothing is stored
    pub enabled: bool,

    /// Maximum number of files held in the byte cache (entry count, not bytes)
    pub byte_cache_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            byte_cache_capacity: DEFAULT_BYTE_CACHE_CAPACITY,
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Which resolver backend to use
    pub backend: ResolverBackend,

    /// kpsewhich program (name on PATH or absolute path)
    pub kpsewhich: PathBuf,

    /// Directories searched by the search_path backend.
    /// A trailing `//` searches subdirectories too.
    pub search_paths: Vec<String>,

    /// Directory holding the pass-through preamble files (empty = working directory)
    pub preamble_dir: PathBuf,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            backend: ResolverBackend::Kpsewhich,
            kpsewhich: PathBuf::from("kpsewhich"),
            search_paths: Vec::new(),
            preamble_dir: PathBuf::new(),
        }
    }
}

/// Resolver backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverBackend {
    /// Shell out to the kpathsea command-line front end
    Kpsewhich,

    /// Search a fixed list of directories
    SearchPath,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string for an env filter.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
