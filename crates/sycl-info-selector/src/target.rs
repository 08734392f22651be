//! Interpretation of vendor and device-type requests.
//!
//! A request is written `vendor[:device_type]`, e.g. `intel:gpu`. Either half
//! may be a wildcard (empty, `any` or `*`). A lone device-type keyword in the
//! vendor slot (`gpu`) is read as a device type with any vendor.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SelectorError};

/// Environment variable holding a default `vendor[:device_type]` request.
pub const TARGET_ENV_VAR: &str = "SYCL_TARGET";

/// Returns true if `target` matches everything: empty, `"any"` or `"*"`.
pub fn is_target_any(target: &str) -> bool {
    target.is_empty() || target == "any" || target == "*"
}

/// Class of compute device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    All,
    Gpu,
    Cpu,
    Accelerator,
}

impl DeviceType {
    /// Parse a device-type keyword. Wildcards map to [`DeviceType::All`];
    /// `gpu`, `cpu` and `accel` are matched case-insensitively.
    pub fn parse(requested: &str) -> Option<DeviceType> {
        if is_target_any(requested) {
            return Some(DeviceType::All);
        }
        match requested.to_lowercase().as_str() {
            "gpu" => Some(DeviceType::Gpu),
            "cpu" => Some(DeviceType::Cpu),
            "accel" => Some(DeviceType::Accelerator),
            _ => None,
        }
    }

    /// The keyword for this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            DeviceType::All => "any",
            DeviceType::Gpu => "gpu",
            DeviceType::Cpu => "cpu",
            DeviceType::Accelerator => "accel",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A `vendor[:device_type]` request split into its halves, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRequest {
    pub vendor: String,
    pub device_type: String,
}

impl TargetRequest {
    /// Validate the request into a filter.
    pub fn filter(&self) -> Result<DeviceFilter> {
        DeviceFilter::resolve(&self.vendor, &self.device_type)
    }
}

/// Split `vendor[:device_type]`. A second `:` is an error; no other
/// validation happens here.
pub fn parse_target(target: &str) -> Result<TargetRequest> {
    let (vendor, device_type) = match target.split_once(':') {
        Some((vendor, device_type)) => (vendor, device_type),
        None => (target, ""),
    };
    if device_type.contains(':') {
        return Err(SelectorError::InvalidTarget {
            target: target.to_string(),
        });
    }
    Ok(TargetRequest {
        vendor: vendor.to_string(),
        device_type: device_type.to_string(),
    })
}

/// Short vendor codes mapped to the full names that appear in platform names.
///
/// During platform matching, a platform whose name contains any full name in
/// the table is accepted even when the requested vendor is not a substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorAliases {
    aliases: BTreeMap<String, String>,
}

impl VendorAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an alias. The full name is compared case-insensitively.
    pub fn insert(&mut self, code: impl Into<String>, full_name: impl Into<String>) {
        self.aliases
            .insert(code.into(), full_name.into().to_lowercase());
    }

    /// Full name registered for `code`.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.aliases.get(code).map(String::as_str)
    }

    /// All registered full names, lowercased.
    pub fn full_names(&self) -> impl Iterator<Item = &str> {
        self.aliases.values().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VendorAliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = VendorAliases::new();
        for (code, full_name) in iter {
            aliases.insert(code, full_name);
        }
        aliases
    }
}

/// Returns true if a platform called `platform_name` satisfies `requested`.
///
/// Case-insensitive substring match, falling back to the alias table.
pub fn match_platform(requested: &str, platform_name: &str, aliases: &VendorAliases) -> bool {
    let requested = requested.to_lowercase();
    let platform_name = platform_name.to_lowercase();

    if is_target_any(&requested) || platform_name.contains(&requested) {
        return true;
    }
    aliases.full_names().any(|name| platform_name.contains(name))
}

/// A validated vendor and device-type filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFilter {
    /// Vendor substring; empty means any vendor.
    pub vendor: String,
    pub device_type: DeviceType,
}

impl DeviceFilter {
    /// A filter accepting every platform and device.
    pub fn any() -> Self {
        DeviceFilter {
            vendor: String::new(),
            device_type: DeviceType::All,
        }
    }

    /// Interpret a vendor and device-type pair.
    ///
    /// If `vendor` is a device-type keyword it becomes the device type and
    /// the vendor becomes "any"; giving a device type as well is then an
    /// error.
    pub fn resolve(vendor: &str, device_type: &str) -> Result<DeviceFilter> {
        if !is_target_any(vendor) {
            if let Some(vendor_as_type) = DeviceType::parse(vendor) {
                if !is_target_any(device_type) {
                    return Err(SelectorError::DeviceTypeSpecifiedTwice {
                        vendor: vendor.to_string(),
                        device_type: device_type.to_string(),
                    });
                }
                return Ok(DeviceFilter {
                    vendor: String::new(),
                    device_type: vendor_as_type,
                });
            }
        }

        let parsed = DeviceType::parse(device_type).ok_or_else(|| {
            SelectorError::InvalidDeviceType {
                requested: device_type.to_string(),
            }
        })?;
        let vendor = if is_target_any(vendor) { "" } else { vendor };
        Ok(DeviceFilter {
            vendor: vendor.to_string(),
            device_type: parsed,
        })
    }

    /// Returns true if devices on `platform_name` should be considered.
    pub fn accepts_platform(&self, platform_name: &str, aliases: &VendorAliases) -> bool {
        match_platform(&self.vendor, platform_name, aliases)
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        DeviceFilter::any()
    }
}
