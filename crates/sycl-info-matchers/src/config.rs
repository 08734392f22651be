//! Selecting a platform/device configuration from a matched set and
//! resolving the back-end it compiles for.

use std::fmt;
use std::str::FromStr;

use crate::descriptor::Descriptor;
use crate::error::{MatchError, Result};
use crate::model::PlatformSet;

/// A `platform:device` choice. Both indices are 1-based positions in a
/// matched [`PlatformSet`], in key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSelector {
    pub platform_index: usize,
    pub device_index: usize,
}

impl ConfigSelector {
    pub fn new(platform_index: usize, device_index: usize) -> Self {
        ConfigSelector {
            platform_index,
            device_index,
        }
    }
}

impl FromStr for ConfigSelector {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| MatchError::InvalidSelector {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let (platform, device) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected <platform>:<device>"))?;
        let platform_index = platform
            .trim()
            .parse()
            .map_err(|_| invalid("platform index is not a non-negative integer"))?;
        let device_index = device
            .trim()
            .parse()
            .map_err(|_| invalid("device index is not a non-negative integer"))?;
        Ok(ConfigSelector::new(platform_index, device_index))
    }
}

impl fmt::Display for ConfigSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform_index, self.device_index)
    }
}

/// Platform and device names of a selected configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub platform: String,
    pub device: String,
}

/// Returns true if both indices of `selector` fall inside `platforms`.
pub fn is_config_index_valid(platforms: &PlatformSet, selector: ConfigSelector) -> bool {
    try_select_config(platforms, selector).is_ok()
}

/// Look up the configuration at `selector`, reporting which index was out of
/// range on failure.
pub fn try_select_config(platforms: &PlatformSet, selector: ConfigSelector) -> Result<Config> {
    let platform = selector
        .platform_index
        .checked_sub(1)
        .and_then(|i| platforms.nth(i))
        .ok_or(MatchError::PlatformIndexOutOfRange {
            index: selector.platform_index,
            count: platforms.len(),
        })?;
    let device = selector
        .device_index
        .checked_sub(1)
        .and_then(|i| platform.devices.nth(i))
        .ok_or_else(|| MatchError::DeviceIndexOutOfRange {
            platform: platform.name().to_string(),
            index: selector.device_index,
            count: platform.devices.len(),
        })?;
    Ok(Config {
        platform: platform.name().to_string(),
        device: device.name().to_string(),
    })
}

/// The configuration at `selector`, or `None` if either index is out of range.
pub fn select_config(platforms: &PlatformSet, selector: ConfigSelector) -> Option<Config> {
    try_select_config(platforms, selector).ok()
}

/// Back-end name and device-compiler flags for a configuration.
///
/// The default value (empty `backend`) means no back-end was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendInfo {
    pub backend: String,
    pub device_flags: String,
}

impl BackendInfo {
    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }
}

/// Find the back-end for `config` in `descriptor`.
///
/// With an empty `target` the configuration's first back-end is returned;
/// otherwise the first back-end named `target`.
pub fn try_resolve_backend(
    config: &Config,
    descriptor: &Descriptor,
    target: &str,
) -> Result<BackendInfo> {
    let found = descriptor
        .configuration(&config.platform, &config.device)
        .ok_or_else(|| MatchError::ConfigurationNotFound {
            platform: config.platform.clone(),
            device: config.device.clone(),
        })?;

    let backends = &found.supported_backend_targets;
    let backend = if target.is_empty() {
        backends.first().ok_or_else(|| MatchError::NoBackendTargets {
            platform: config.platform.clone(),
            device: config.device.clone(),
        })?
    } else {
        backends
            .iter()
            .find(|b| b.backend_target == target)
            .ok_or_else(|| MatchError::BackendTargetNotFound {
                target: target.to_string(),
            })?
    };

    Ok(BackendInfo {
        backend: backend.backend_target.clone(),
        device_flags: backend.device_flags.clone(),
    })
}

/// [`try_resolve_backend`], with every miss collapsed to an empty
/// [`BackendInfo`].
pub fn resolve_backend(config: &Config, descriptor: &Descriptor, target: &str) -> BackendInfo {
    try_resolve_backend(config, descriptor, target).unwrap_or_default()
}
