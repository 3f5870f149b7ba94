//! Command-line arguments.
//!
//! Flags override values from the optional YAML config file, which in turn
//! override built-in defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use texfetch_core::config::{ResolverBackend, ServerConfig};
use texfetch_core::error::Result;

/// TeX engine file server with resolution and content caching
#[derive(Parser, Debug, Default)]
#[command(name = "texfetch", version, about)]
pub struct Args {
    /// YAML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (default: 0.0.0.0:5001).
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Disable caching: resolve and read every request fresh.
    #[arg(long)]
    pub no_cache: bool,

    /// Maximum number of files kept in memory (default: 30000).
    #[arg(long)]
    pub byte_cache_capacity: Option<usize>,

    /// Resolver backend.
    #[arg(long, value_enum)]
    pub resolver: Option<BackendArg>,

    /// kpsewhich program used by the kpsewhich backend.
    #[arg(long)]
    pub kpsewhich: Option<PathBuf>,

    /// Directory searched by the search-path backend; repeatable.
    /// A trailing `//` searches subdirectories too.
    #[arg(long = "search-path")]
    pub search_paths: Vec<String>,

    /// Directory holding the preamble format files.
    #[arg(long)]
    pub preamble_dir: Option<PathBuf>,
}

/// Resolver backend choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Kpsewhich,
    SearchPath,
}

impl From<BackendArg> for ResolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Kpsewhich => ResolverBackend::Kpsewhich,
            BackendArg::SearchPath => ResolverBackend::SearchPath,
        }
    }
}

impl Args {
    /// Merge the config file (if any) with command-line overrides.
    pub fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
        if let Some(capacity) = self.byte_cache_capacity {
            config.cache.byte_cache_capacity = capacity;
        }
        if let Some(backend) = self.resolver {
            config.resolver.backend = backend.into();
        }
        if let Some(program) = self.kpsewhich {
            config.resolver.kpsewhich = program;
        }
        if !self.search_paths.is_empty() {
            config.resolver.search_paths = self.search_paths;
        }
        if let Some(dir) = self.preamble_dir {
            config.resolver.preamble_dir = dir;
        }

        config.validate()?;
        Ok(config)
    }
}
