//! Live hardware snapshot.

use sycl_info_matchers::PlatformSet;
use sycl_info_selector::{
    describe, find_devices, ComputeApi, DeviceFilter, VendorAliases, OPENCL_AVAILABLE,
};
use tracing::debug;

/// Name of the platform API compiled into this binary.
pub fn api_name() -> &'static str {
    if OPENCL_AVAILABLE {
        "OpenCL"
    } else {
        "none (built without the `opencl` feature)"
    }
}

/// The platform API compiled into this binary.
#[cfg(feature = "opencl")]
pub fn native_api() -> impl ComputeApi {
    sycl_info_selector::OpenClApi::new()
}

/// The platform API compiled into this binary.
#[cfg(not(feature = "opencl"))]
pub fn native_api() -> impl ComputeApi {
    debug!("No platform API available; no platforms will be found");
    sycl_info_selector::InMemoryApi::new()
}

/// Enumerate the devices accepted by `filter` into a canonical set.
pub fn snapshot<A: ComputeApi>(
    api: &A,
    filter: &DeviceFilter,
    include_all_devices: bool,
) -> PlatformSet {
    let handles = find_devices(api, filter, include_all_devices, &VendorAliases::new());
    let records = describe(api, &handles);
    let hardware = PlatformSet::from_hardware(&records);
    debug!(
        "Hardware snapshot: {} platform(s), {} device(s)",
        hardware.len(),
        hardware.device_count()
    );
    hardware
}
