//! Discovery and loading of `.syclinfo` implementation descriptors.
//!
//! Descriptors are looked up in the directories named by the
//! `SYCL_VENDOR_PATHS` environment variable plus an optional hint directory.

pub mod error;
pub mod paths;
pub mod scan;

pub use error::{FinderError, Result};
pub use paths::{search_paths, search_paths_from_env, split_paths, VENDOR_PATHS_ENV};
pub use scan::{
    discover_descriptor_files, find_descriptors, is_descriptor_file, load_catalog, load_descriptor,
    parse_descriptor, DESCRIPTOR_SUFFIX,
};
