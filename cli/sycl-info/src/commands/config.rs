//! `sycl-info --impl <impl> --config P:D --device-cflags` - back-end and
//! device-compiler flags for one configuration.

use std::io::Write;

use anyhow::Result;
use sycl_info_matchers::{
    try_resolve_backend, try_select_config, BackendInfo, ConfigSelector, Descriptor, PlatformSet,
};
use tracing::warn;

use crate::commands::show::platforms_for;

/// Print the back-end for the configuration at `selector`.
///
/// An out-of-range selector prints nothing. A configuration with no matching
/// back-end prints empty fields.
pub fn run(
    descriptor: &Descriptor,
    hardware: &PlatformSet,
    selector: ConfigSelector,
    target: &str,
    display_all: bool,
    out: &mut impl Write,
) -> Result<()> {
    let platforms = platforms_for(descriptor, hardware, display_all);
    let config = match try_select_config(&platforms, selector) {
        Ok(config) => config,
        Err(e) => {
            warn!("No configuration {selector}: {e}");
            return Ok(());
        }
    };

    let info = try_resolve_backend(&config, descriptor, target).unwrap_or_else(|e| {
        warn!("{e}");
        BackendInfo::default()
    });
    write_backend(&info, out)
}

pub fn write_backend(info: &BackendInfo, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Backend: {}", info.backend)?;
    writeln!(out, "Device flags: {}", info.device_flags)?;
    Ok(())
}
