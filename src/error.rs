//! Error types for the easel asset generation tool.

use std::path::PathBuf;
use thiserror::Error;

/// Pre-flight configuration errors. Always fatal: reported before any task is
/// scheduled, and nothing has been written when one surfaces.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not set: export {0} before running")]
    MissingApiKey(String),

    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),

    #[error("Catalog file not found: {0}")]
    CatalogNotFound(PathBuf),

    #[error("Config I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Per-task generation errors. Isolated at the runner boundary: one of these
/// becomes a Failure result for its task and never aborts sibling tasks.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Generation returned no image: {0}")]
    EmptyGeneration(String),

    #[error("Reference image unavailable: {0}")]
    ReferenceUnavailable(String),

    #[error("Failed to write asset {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::InvalidValue(err.to_string())
    }
}
