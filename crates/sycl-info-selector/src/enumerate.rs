//! Platform and device enumeration.
//!
//! Native API failures never abort an enumeration: they are logged and the
//! affected platform or device is skipped. Only a malformed request is an
//! error.

use tracing::{debug, warn};

use crate::api::{ComputeApi, DeviceInfo, PlatformInfo};
use crate::error::{ApiError, Result};
use crate::normalize::trim_end_owned;
use crate::target::{DeviceFilter, VendorAliases};

/// Extension a device must report to be usable without `include_all_devices`.
pub const SPIR_EXTENSION: &str = "cl_khr_spir";

/// Placeholder for a string attribute that could not be read.
pub const ERROR_STRING: &str = "(ERROR)";

/// Placeholder for a platform name that could not be read during filtering.
const UNKNOWN_PLATFORM: &str = "N/A";

/// Status code the API uses for "no devices of that type".
pub const DEVICE_NOT_FOUND: i32 = -1;

/// Normalized names of a platform/device pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRecord {
    pub platform_name: String,
    pub platform_vendor: String,
    pub device_name: String,
    pub device_vendor: String,
}

/// Find devices matching `vendor` and `device_type`.
///
/// See [`DeviceFilter::resolve`] for how the two strings are interpreted.
/// Devices without SPIR support are dropped unless `include_all_devices`.
pub fn enumerate<A: ComputeApi>(
    api: &A,
    vendor: &str,
    device_type: &str,
    include_all_devices: bool,
    aliases: &VendorAliases,
) -> Result<Vec<(A::Platform, A::Device)>> {
    let filter = DeviceFilter::resolve(vendor, device_type)?;
    Ok(find_devices(api, &filter, include_all_devices, aliases))
}

/// Find devices accepted by an already-validated filter.
pub fn find_devices<A: ComputeApi>(
    api: &A,
    filter: &DeviceFilter,
    include_all_devices: bool,
    aliases: &VendorAliases,
) -> Vec<(A::Platform, A::Device)> {
    let platforms = match api.platforms() {
        Ok(platforms) => platforms,
        Err(e) => {
            warn!("Unable to retrieve platforms: {e}");
            return Vec::new();
        }
    };
    if platforms.is_empty() {
        debug!("No compute platforms found");
        return Vec::new();
    }

    let mut found = Vec::new();
    for platform in platforms {
        let platform_name = platform_name(api, platform);
        if !filter.accepts_platform(&platform_name, aliases) {
            debug!("Skipping platform {platform_name}: vendor does not match");
            continue;
        }
        debug!("Scanning platform: {platform_name}");

        let devices = match api.devices(platform, filter.device_type) {
            Ok(devices) => devices,
            Err(e) if e.code == DEVICE_NOT_FOUND => {
                debug!("No {} devices on platform {platform_name}", filter.device_type);
                continue;
            }
            Err(e) => {
                warn!("Unable to retrieve devices for platform {platform_name}: {e}");
                continue;
            }
        };

        for device in devices {
            if include_all_devices || has_spir(api, device) {
                found.push((platform, device));
            }
        }
    }
    found
}

/// Returns true if the device advertises [`SPIR_EXTENSION`].
pub fn has_spir<A: ComputeApi>(api: &A, device: A::Device) -> bool {
    device_string(api, device, DeviceInfo::Extensions).contains(SPIR_EXTENSION)
}

/// Read the normalized names of each platform/device pair.
pub fn describe<A: ComputeApi>(api: &A, handles: &[(A::Platform, A::Device)]) -> Vec<DeviceRecord> {
    handles
        .iter()
        .map(|&(platform, device)| DeviceRecord {
            platform_name: platform_string(api, platform, PlatformInfo::Name),
            platform_vendor: platform_string(api, platform, PlatformInfo::Vendor),
            device_name: device_string(api, device, DeviceInfo::Name),
            device_vendor: device_string(api, device, DeviceInfo::Vendor),
        })
        .collect()
}

fn platform_name<A: ComputeApi>(api: &A, platform: A::Platform) -> String {
    api.platform_info(platform, PlatformInfo::Name)
        .map(trim_end_owned)
        .unwrap_or_else(|e| {
            warn!("Unable to retrieve platform name: {e}");
            UNKNOWN_PLATFORM.to_string()
        })
}

fn platform_string<A: ComputeApi>(api: &A, platform: A::Platform, info: PlatformInfo) -> String {
    normalized_or_error(api.platform_info(platform, info), || format!("platform {info:?}"))
}

fn device_string<A: ComputeApi>(api: &A, device: A::Device, info: DeviceInfo) -> String {
    normalized_or_error(api.device_info(device, info), || format!("device {info:?}"))
}

fn normalized_or_error(
    result: std::result::Result<String, ApiError>,
    what: impl FnOnce() -> String,
) -> String {
    match result {
        Ok(value) => trim_end_owned(value),
        Err(e) => {
            warn!("Failed to retrieve {}: {e}", what());
            ERROR_STRING.to_string()
        }
    }
}
