//! `sycl-info --impl <impl>` - platforms and devices usable with an
//! implementation.

use std::io::Write;

use anyhow::Result;
use sycl_info_matchers::{match_descriptor, Descriptor, PlatformSet};

const SEPARATOR: &str = "====================================================";

/// The platform set to display: the hardware snapshot itself when
/// `display_all`, otherwise its intersection with the descriptor.
pub fn platforms_for(
    descriptor: &Descriptor,
    hardware: &PlatformSet,
    display_all: bool,
) -> PlatformSet {
    if display_all {
        hardware.clone()
    } else {
        match_descriptor(descriptor, hardware)
    }
}

/// Print `platforms` with the 1-based indices `--config` expects.
pub fn write_platforms(platforms: &PlatformSet, out: &mut impl Write) -> Result<()> {
    for (p, platform) in platforms.iter().enumerate() {
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "{}. Platform name: {}", p + 1, platform.name())?;
        writeln!(out, "Platform vendor: {}", platform.vendor())?;
        for (d, device) in platform.devices.iter().enumerate() {
            writeln!(out, "  {}. Device name: {}", d + 1, device.name())?;
            writeln!(out, "     Device vendor: {}", device.vendor())?;
            writeln!(out, "     Supported drivers: {}", device.drivers.join(" "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn run(
    descriptor: &Descriptor,
    hardware: &PlatformSet,
    display_all: bool,
    out: &mut impl Write,
) -> Result<()> {
    let platforms = platforms_for(descriptor, hardware, display_all);
    write_platforms(&platforms, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sycl_info_matchers::SupportedConfiguration;
    use sycl_info_selector::DeviceRecord;

    fn descriptor() -> Descriptor {
        Descriptor {
            name: "Acme SYCL".into(),
            version: "1.0".into(),
            vendor: "Acme".into(),
            supported_configurations: vec![SupportedConfiguration {
                platform_name: "OpenCL".into(),
                platform_vendor: "Acme".into(),
                device_name: "GPU0".into(),
                device_vendor: "Acme".into(),
                supported_drivers: vec!["1.2".into(), "2.0".into()],
                supported_backend_targets: Vec::new(),
            }],
        }
    }

    fn hardware() -> PlatformSet {
        let record = |platform: &str, device: &str| DeviceRecord {
            platform_name: platform.into(),
            platform_vendor: "Acme".into(),
            device_name: device.into(),
            device_vendor: "Acme".into(),
        };
        PlatformSet::from_hardware(&[
            record("OpenCL", "GPU0"),
            record("OpenCL", "CPU0"),
            record("Other", "X"),
        ])
    }

    #[test]
    fn prints_matched_configuration() {
        let mut out = Vec::new();
        run(&descriptor(), &hardware(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1. Platform name: OpenCL\n"));
        assert!(text.contains("  1. Device name: GPU0\n"));
        assert!(text.contains("Supported drivers: 1.2 2.0\n"));
        assert!(!text.contains("CPU0"));
        assert!(!text.contains("Other"));
    }

    #[test]
    fn display_all_prints_hardware() {
        let platforms = platforms_for(&descriptor(), &hardware(), true);
        assert_eq!(platforms.len(), 2);
        let mut out = Vec::new();
        write_platforms(&platforms, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  1. Device name: CPU0\n"));
        assert!(text.contains("  2. Device name: GPU0\n"));
        assert!(text.contains("2. Platform name: Other\n"));
    }

    #[test]
    fn nothing_matched_prints_nothing() {
        let mut out = Vec::new();
        run(&descriptor(), &PlatformSet::new(), false, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
