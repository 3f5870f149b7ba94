use std::path::PathBuf;

use thiserror::Error;

use crate::request::Category;

/// TeX file cache error types
#[derive(Error, Debug)]
pub enum FetchError {
    /// A resolved file passed the existence check but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resolver backend failed in a way that is not "file not found"
    #[error("Resolver error: {category}/{filename} - {message}")]
    ResolverError {
        category: Category,
        filename: String,
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FetchError {
    /// Whether the failure is transient filesystem trouble, so the same
    /// request may succeed later. Backend and configuration failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::ReadError { .. })
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for FetchError {
    fn from(err: serde_yaml::Error) -> Self {
        FetchError::SerializationError(err.to_string())
    }
}

/// Result type alias for TeX file cache operations
pub type Result<T> = std::result::Result<T, FetchError>;
