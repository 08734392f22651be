//! Error types for platform and device selection.

/// A failed call into the native compute API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("OpenCL error {code}: {context}")]
pub struct ApiError {
    /// Status code returned by the API.
    pub code: i32,
    /// What was being attempted when the call failed.
    pub context: String,
}

impl ApiError {
    /// Create an error for the given status code.
    pub fn new(code: i32, context: impl Into<String>) -> Self {
        ApiError {
            code,
            context: context.into(),
        }
    }
}

/// Errors that can occur while interpreting a device request.
///
/// Native API failures during enumeration are logged and skipped, so they
/// never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// The target string has more than one `:` separator.
    #[error("requested target string has no valid format: {target}")]
    InvalidTarget { target: String },

    /// The requested device type is not one of the recognized keywords.
    #[error("invalid device type: {requested}")]
    InvalidDeviceType { requested: String },

    /// The vendor slot named a device type and a device type was also given.
    #[error("cannot specify device type twice: {vendor}:{device_type}")]
    DeviceTypeSpecifiedTwice { vendor: String, device_type: String },
}

/// Result type for selector operations.
pub type Result<T> = std::result::Result<T, SelectorError>;
