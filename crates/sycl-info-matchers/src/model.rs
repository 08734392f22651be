//! Platform and device records, and matching advertised configurations
//! against the hardware that is actually present.

use std::cmp::Ordering;

use sycl_info_selector::DeviceRecord;
use tracing::debug;

use crate::descriptor::Descriptor;
use crate::set::{Keyed, KeyedSet, RecordKey};

/// A device, identified by name and vendor. Drivers are payload: they do not
/// take part in comparisons.
#[derive(Debug, Clone)]
pub struct Device {
    key: RecordKey,
    pub drivers: Vec<String>,
}

impl Device {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Device::from_key(RecordKey::new(name, vendor))
    }

    pub fn from_key(key: RecordKey) -> Self {
        Device {
            key,
            drivers: Vec::new(),
        }
    }

    pub fn with_drivers(mut self, drivers: Vec<String>) -> Self {
        self.drivers = drivers;
        self
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn vendor(&self) -> &str {
        &self.key.vendor
    }
}

/// A platform, identified by name and vendor, with its devices as payload.
#[derive(Debug, Clone)]
pub struct Platform {
    key: RecordKey,
    pub devices: DeviceSet,
}

impl Platform {
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Platform::from_key(RecordKey::new(name, vendor))
    }

    pub fn from_key(key: RecordKey) -> Self {
        Platform {
            key,
            devices: DeviceSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn vendor(&self) -> &str {
        &self.key.vendor
    }
}

macro_rules! impl_keyed_ordering {
    ($ty:ty) => {
        impl Keyed for $ty {
            fn key(&self) -> &RecordKey {
                &self.key
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.key.cmp(&other.key)
            }
        }
    };
}

impl_keyed_ordering!(Device);
impl_keyed_ordering!(Platform);

pub type DeviceSet = KeyedSet<Device>;
pub type PlatformSet = KeyedSet<Platform>;

impl KeyedSet<Platform> {
    /// Canonical set of the platforms and devices a descriptor advertises.
    ///
    /// Configurations sharing a platform key are merged into one platform.
    /// A repeated device key under the same platform replaces the earlier
    /// device, so its driver list is the last one seen.
    pub fn from_descriptor(descriptor: &Descriptor) -> PlatformSet {
        let mut platforms = PlatformSet::new();
        for config in &descriptor.supported_configurations {
            let platform = platforms.get_or_insert_with(
                RecordKey::new(&config.platform_name, &config.platform_vendor),
                Platform::from_key,
            );
            platform.devices.insert(
                Device::new(&config.device_name, &config.device_vendor)
                    .with_drivers(config.supported_drivers.clone()),
            );
        }
        platforms
    }

    /// Canonical set of enumerated hardware. Devices carry no drivers.
    pub fn from_hardware(records: &[DeviceRecord]) -> PlatformSet {
        let mut platforms = PlatformSet::new();
        for record in records {
            let platform = platforms.get_or_insert_with(
                RecordKey::new(&record.platform_name, &record.platform_vendor),
                Platform::from_key,
            );
            platform.devices.get_or_insert_with(
                RecordKey::new(&record.device_name, &record.device_vendor),
                Device::from_key,
            );
        }
        platforms
    }

    /// Number of devices across all platforms.
    pub fn device_count(&self) -> usize {
        self.iter().map(|p| p.devices.len()).sum()
    }
}

/// Platforms present in both `advertised` and `hardware`, each narrowed to
/// the devices present on both sides.
///
/// Records are taken from `advertised`, so drivers come from the descriptor.
/// A platform whose device intersection is empty is still returned.
pub fn intersect(advertised: &PlatformSet, hardware: &PlatformSet) -> PlatformSet {
    advertised
        .intersection(hardware)
        .map(|(ours, theirs)| Platform {
            key: ours.key.clone(),
            devices: ours
                .devices
                .intersection(&theirs.devices)
                .map(|(device, _)| device.clone())
                .collect(),
        })
        .collect()
}

/// Match a descriptor's advertised configurations against `hardware`.
pub fn match_descriptor(descriptor: &Descriptor, hardware: &PlatformSet) -> PlatformSet {
    let advertised = PlatformSet::from_descriptor(descriptor);
    let matched = intersect(&advertised, hardware);
    debug!(
        "{}: {} of {} advertised platforms present, {} devices usable",
        descriptor.name,
        matched.len(),
        advertised.len(),
        matched.device_count()
    );
    matched
}
