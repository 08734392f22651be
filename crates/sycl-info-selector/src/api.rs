//! The seam between enumeration logic and a native compute API.
//!
//! Enumeration only needs four queries: list platforms, read a platform
//! string, list a platform's devices of some type, and read a device string.
//! Handles are opaque `Copy` values owned by the implementation; they are
//! valid for as long as the implementation value is alive.

use crate::error::ApiError;
use crate::target::DeviceType;

/// Platform string attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformInfo {
    Name,
    Vendor,
}

/// Device string attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceInfo {
    Name,
    Vendor,
    /// Space-separated extension list.
    Extensions,
}

/// A platform/device query interface.
pub trait ComputeApi {
    /// Opaque platform handle.
    type Platform: Copy;
    /// Opaque device handle.
    type Device: Copy;

    /// All platforms known to the runtime. An environment with no platforms
    /// returns an empty list, not an error.
    fn platforms(&self) -> Result<Vec<Self::Platform>, ApiError>;

    /// Read a string attribute of a platform.
    fn platform_info(&self, platform: Self::Platform, info: PlatformInfo)
        -> Result<String, ApiError>;

    /// Devices of `device_type` on `platform`.
    fn devices(
        &self,
        platform: Self::Platform,
        device_type: DeviceType,
    ) -> Result<Vec<Self::Device>, ApiError>;

    /// Read a string attribute of a device.
    fn device_info(&self, device: Self::Device, info: DeviceInfo) -> Result<String, ApiError>;
}
