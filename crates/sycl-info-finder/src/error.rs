//! Error types for descriptor discovery.

use std::path::PathBuf;

/// Errors that can occur while loading descriptors.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// Descriptor file not found.
    #[error("descriptor file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Malformed descriptor JSON.
    #[error("invalid descriptor {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON parse error without a file.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;
