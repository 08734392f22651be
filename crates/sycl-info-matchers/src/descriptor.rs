//! `.syclinfo` descriptor documents and the catalog of loaded descriptors.

use serde::{Deserialize, Serialize};

/// A SYCL implementation's self-description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub version: String,
    pub vendor: String,
    /// Platform/device combinations, in file order.
    #[serde(default)]
    pub supported_configurations: Vec<SupportedConfiguration>,
}

/// One advertised platform/device combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedConfiguration {
    pub platform_name: String,
    pub platform_vendor: String,
    pub device_name: String,
    pub device_vendor: String,
    #[serde(default)]
    pub supported_drivers: Vec<String>,
    /// Back-ends for this combination; the first is the default.
    #[serde(default)]
    pub supported_backend_targets: Vec<BackendTarget>,
}

/// A named compilation target and the device-compiler flags it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendTarget {
    pub backend_target: String,
    #[serde(default)]
    pub device_flags: String,
}

impl Descriptor {
    /// The first configuration whose platform and device names are both
    /// equal to the given ones.
    pub fn configuration(
        &self,
        platform_name: &str,
        device_name: &str,
    ) -> Option<&SupportedConfiguration> {
        self.supported_configurations
            .iter()
            .find(|c| c.platform_name == platform_name && c.device_name == device_name)
    }
}

/// The descriptors discovered at startup, in discovery order.
///
/// Positions exposed to users are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    descriptors: Vec<Descriptor>,
}

impl Catalog {
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Catalog { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descriptors.iter()
    }

    /// The descriptor at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&Descriptor> {
        index.checked_sub(1).and_then(|i| self.descriptors.get(i))
    }

    /// Resolve a user's implementation choice to a 1-based index.
    ///
    /// An exact name match wins; otherwise `query` must be an integer in
    /// `1..=len`. Anything else is `None`.
    pub fn resolve_index(&self, query: &str) -> Option<usize> {
        if let Some(position) = self.descriptors.iter().position(|d| d.name == query) {
            return Some(position + 1);
        }
        match query.parse::<usize>() {
            Ok(index) if (1..=self.descriptors.len()).contains(&index) => Some(index),
            _ => None,
        }
    }

    /// Resolve `query` and return the descriptor with its 1-based index.
    pub fn resolve(&self, query: &str) -> Option<(usize, &Descriptor)> {
        let index = self.resolve_index(query)?;
        self.get(index).map(|d| (index, d))
    }
}

impl FromIterator<Descriptor> for Catalog {
    fn from_iter<I: IntoIterator<Item = Descriptor>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
