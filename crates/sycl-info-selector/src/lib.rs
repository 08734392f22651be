//! Compute platform and device enumeration for sycl-info.
//!
//! Queries a platform/device API (OpenCL when built with the `opencl`
//! feature), filters the result by vendor and device type, and normalizes
//! the strings the API hands back.

pub mod api;
pub mod enumerate;
pub mod error;
pub mod memory;
pub mod normalize;
#[cfg(feature = "opencl")]
pub mod opencl;
pub mod target;

pub use api::{ComputeApi, DeviceInfo, PlatformInfo};
pub use enumerate::{describe, enumerate, find_devices, has_spir, DeviceRecord};
pub use error::{ApiError, Result, SelectorError};
pub use memory::{InMemoryApi, MemoryDevice};
pub use normalize::{trim_end, trim_end_owned};
#[cfg(feature = "opencl")]
pub use opencl::OpenClApi;
pub use target::{
    is_target_any, match_platform, parse_target, DeviceFilter, DeviceType, TargetRequest,
    VendorAliases, TARGET_ENV_VAR,
};

/// Whether the OpenCL backend was compiled in.
pub const OPENCL_AVAILABLE: bool = cfg!(feature = "opencl");
