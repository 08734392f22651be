//! Matching of SYCL implementation descriptors against available hardware.
//!
//! A descriptor advertises the platform/device combinations an
//! implementation supports. This crate turns descriptors and enumerated
//! hardware into ordered [`PlatformSet`]s keyed by `(name, vendor)`,
//! intersects them, and resolves a user's `platform:device` choice back to
//! the back-end and compiler flags recorded in the descriptor.
//!
//! Lookups that find nothing are not errors: the sentinel-returning
//! functions ([`Catalog::resolve_index`], [`select_config`],
//! [`resolve_backend`]) yield `None` or an empty value, and the `try_`
//! variants say why.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod model;
pub mod set;

pub use config::{
    is_config_index_valid, resolve_backend, select_config, try_resolve_backend, try_select_config,
    BackendInfo, Config, ConfigSelector,
};
pub use descriptor::{BackendTarget, Catalog, Descriptor, SupportedConfiguration};
pub use error::{MatchError, Result};
pub use model::{intersect, match_descriptor, Device, DeviceSet, Platform, PlatformSet};
pub use set::{Keyed, KeyedSet, RecordKey};
