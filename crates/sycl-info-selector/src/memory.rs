//! An in-memory [`ComputeApi`] backed by a fixed platform/device table.
//!
//! Used when no native runtime is compiled in, and to exercise enumeration
//! without hardware. Failures can be injected per platform or per device.

use crate::api::{ComputeApi, DeviceInfo, PlatformInfo};
use crate::enumerate::DEVICE_NOT_FOUND;
use crate::error::ApiError;
use crate::target::DeviceType;

const INVALID_PLATFORM: i32 = -32;
const INVALID_DEVICE: i32 = -33;

/// Handle to a platform in an [`InMemoryApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryPlatformId(usize);

/// Handle to a device in an [`InMemoryApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryDeviceId {
    platform: usize,
    device: usize,
}

/// A device entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDevice {
    pub name: String,
    pub vendor: String,
    pub device_type: DeviceType,
    pub extensions: String,
    readable: bool,
}

impl MemoryDevice {
    pub fn new(
        name: impl Into<String>,
        vendor: impl Into<String>,
        device_type: DeviceType,
    ) -> Self {
        MemoryDevice {
            name: name.into(),
            vendor: vendor.into(),
            device_type,
            extensions: String::new(),
            readable: true,
        }
    }

    pub fn with_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = extensions.into();
        self
    }

    /// Make every attribute query on this device fail.
    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// A platform entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPlatform {
    pub name: String,
    pub vendor: String,
    pub devices: Vec<MemoryDevice>,
    device_error: Option<ApiError>,
}

impl MemoryPlatform {
    pub fn with_device(&mut self, device: MemoryDevice) -> &mut Self {
        self.devices.push(device);
        self
    }

    /// Make device listing on this platform fail with `error`.
    pub fn fail_device_query(&mut self, error: ApiError) -> &mut Self {
        self.device_error = Some(error);
        self
    }
}

/// In-memory platform table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApi {
    platforms: Vec<MemoryPlatform>,
    platform_error: Option<ApiError>,
}

impl InMemoryApi {
    /// An API with no platforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a platform and return it for adding devices.
    pub fn add_platform(
        &mut self,
        name: impl Into<String>,
        vendor: impl Into<String>,
    ) -> &mut MemoryPlatform {
        self.platforms.push(MemoryPlatform {
            name: name.into(),
            vendor: vendor.into(),
            devices: Vec::new(),
            device_error: None,
        });
        let last = self.platforms.len() - 1;
        &mut self.platforms[last]
    }

    /// Make the platform listing fail with `error`.
    pub fn fail_platform_query(&mut self, error: ApiError) {
        self.platform_error = Some(error);
    }

    fn platform(&self, id: MemoryPlatformId) -> Result<&MemoryPlatform, ApiError> {
        self.platforms
            .get(id.0)
            .ok_or_else(|| ApiError::new(INVALID_PLATFORM, "invalid platform"))
    }

    fn device(&self, id: MemoryDeviceId) -> Result<&MemoryDevice, ApiError> {
        self.platforms
            .get(id.platform)
            .and_then(|p| p.devices.get(id.device))
            .ok_or_else(|| ApiError::new(INVALID_DEVICE, "invalid device"))
    }
}

impl ComputeApi for InMemoryApi {
    type Platform = MemoryPlatformId;
    type Device = MemoryDeviceId;

    fn platforms(&self) -> Result<Vec<MemoryPlatformId>, ApiError> {
        if let Some(e) = &self.platform_error {
            return Err(e.clone());
        }
        Ok((0..self.platforms.len()).map(MemoryPlatformId).collect())
    }

    fn platform_info(
        &self,
        platform: MemoryPlatformId,
        info: PlatformInfo,
    ) -> Result<String, ApiError> {
        let platform = self.platform(platform)?;
        Ok(match info {
            PlatformInfo::Name => platform.name.clone(),
            PlatformInfo::Vendor => platform.vendor.clone(),
        })
    }

    fn devices(
        &self,
        platform: MemoryPlatformId,
        device_type: DeviceType,
    ) -> Result<Vec<MemoryDeviceId>, ApiError> {
        let index = platform.0;
        let platform = self.platform(platform)?;
        if let Some(e) = &platform.device_error {
            return Err(e.clone());
        }
        let ids: Vec<_> = platform
            .devices
            .iter()
            .enumerate()
            .filter(|(_, d)| device_type == DeviceType::All || d.device_type == device_type)
            .map(|(device, _)| MemoryDeviceId {
                platform: index,
                device,
            })
            .collect();
        if ids.is_empty() {
            return Err(ApiError::new(DEVICE_NOT_FOUND, "no devices of the requested type"));
        }
        Ok(ids)
    }

    fn device_info(&self, device: MemoryDeviceId, info: DeviceInfo) -> Result<String, ApiError> {
        let device = self.device(device)?;
        if !device.readable {
            return Err(ApiError::new(INVALID_DEVICE, "device attribute unavailable"));
        }
        Ok(match info {
            DeviceInfo::Name => device.name.clone(),
            DeviceInfo::Vendor => device.vendor.clone(),
            DeviceInfo::Extensions => device.extensions.clone(),
        })
    }
}
