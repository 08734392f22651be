//! Error types for matching and configuration lookup.

/// Reasons a selection or lookup produced no result.
///
/// Only [`MatchError::InvalidSelector`] reflects a malformed user input; the
/// rest are misses that callers usually collapse into an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// A `platform:device` selector that is not two non-negative integers.
    #[error("invalid configuration selector '{input}': {reason}")]
    InvalidSelector { input: String, reason: String },

    #[error("platform index {index} out of range (1..={count})")]
    PlatformIndexOutOfRange { index: usize, count: usize },

    #[error("device index {index} out of range for platform '{platform}' (1..={count})")]
    DeviceIndexOutOfRange {
        platform: String,
        index: usize,
        count: usize,
    },

    #[error("no configuration for platform '{platform}' and device '{device}'")]
    ConfigurationNotFound { platform: String, device: String },

    #[error("back-end target '{target}' not supported by this configuration")]
    BackendTargetNotFound { target: String },

    #[error("configuration for '{platform}'/'{device}' lists no back-end targets")]
    NoBackendTargets { platform: String, device: String },
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
