//! [`ComputeApi`] over the system OpenCL ICD loader.

use opencl3::device::{
    Device, CL_DEVICE_TYPE_ACCELERATOR, CL_DEVICE_TYPE_ALL, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU,
};
use opencl3::error_codes::ClError;
use opencl3::platform::{get_platforms, Platform};
use opencl3::types::{cl_device_id, cl_device_type, cl_platform_id};

use crate::api::{ComputeApi, DeviceInfo, PlatformInfo};
use crate::error::ApiError;
use crate::target::DeviceType;

/// OpenCL platform/device queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenClApi;

impl OpenClApi {
    pub fn new() -> Self {
        OpenClApi
    }
}

fn api_error(context: &str) -> impl FnOnce(ClError) -> ApiError + '_ {
    move |e| ApiError::new(e.0, context)
}

fn cl_device_type(device_type: DeviceType) -> cl_device_type {
    match device_type {
        DeviceType::All => CL_DEVICE_TYPE_ALL,
        DeviceType::Gpu => CL_DEVICE_TYPE_GPU,
        DeviceType::Cpu => CL_DEVICE_TYPE_CPU,
        DeviceType::Accelerator => CL_DEVICE_TYPE_ACCELERATOR,
    }
}

impl ComputeApi for OpenClApi {
    type Platform = cl_platform_id;
    type Device = cl_device_id;

    fn platforms(&self) -> Result<Vec<cl_platform_id>, ApiError> {
        let platforms = get_platforms().map_err(api_error("Unable to retrieve platforms."))?;
        Ok(platforms.iter().map(Platform::id).collect())
    }

    fn platform_info(
        &self,
        platform: cl_platform_id,
        info: PlatformInfo,
    ) -> Result<String, ApiError> {
        let platform = Platform::new(platform);
        match info {
            PlatformInfo::Name => platform
                .name()
                .map_err(api_error("Unable to retrieve platform name")),
            PlatformInfo::Vendor => platform
                .vendor()
                .map_err(api_error("Unable to retrieve platform vendor")),
        }
    }

    fn devices(
        &self,
        platform: cl_platform_id,
        device_type: DeviceType,
    ) -> Result<Vec<cl_device_id>, ApiError> {
        Platform::new(platform)
            .get_devices(cl_device_type(device_type))
            .map_err(api_error("Unable to retrieve devices for platform"))
    }

    fn device_info(&self, device: cl_device_id, info: DeviceInfo) -> Result<String, ApiError> {
        let device = Device::new(device);
        match info {
            DeviceInfo::Name => device.name().map_err(api_error("Failed to retrieve the name")),
            DeviceInfo::Vendor => device
                .vendor()
                .map_err(api_error("Failed to retrieve the vendor")),
            DeviceInfo::Extensions => device
                .extensions()
                .map_err(api_error("Failed to retrieve the extensions")),
        }
    }
}
