//! Enumerated hardware matched against a descriptor parsed from JSON, then
//! narrowed to one configuration and its back-end.

use sycl_info_matchers::{
    match_descriptor, resolve_backend, select_config, BackendInfo, Catalog, Config, ConfigSelector,
    Descriptor, Device, Platform, PlatformSet, RecordKey,
};
use sycl_info_selector::{
    describe, find_devices, DeviceFilter, DeviceType, InMemoryApi, MemoryDevice, VendorAliases,
};

const DESCRIPTOR: &str = r#"{
  "name": "Acme SYCL",
  "version": "2.1.0",
  "vendor": "Acme",
  "supported_configurations": [
    {
      "platform_name": "Acme OpenCL",
      "platform_vendor": "Acme Corp",
      "device_name": "Acme GPU",
      "device_vendor": "Acme Corp",
      "supported_drivers": ["2.0", "1.2"],
      "supported_backend_targets": [
        { "backend_target": "spirv64", "device_flags": "-fsycl-targets=spir64" },
        { "backend_target": "ptx64", "device_flags": "-fsycl-targets=nvptx64" }
      ]
    },
    {
      "platform_name": "Acme OpenCL",
      "platform_vendor": "Acme Corp",
      "device_name": "Acme CPU",
      "device_vendor": "Acme Corp",
      "supported_drivers": ["1.2"],
      "supported_backend_targets": [
        { "backend_target": "spirv64", "device_flags": "-fsycl-targets=spir64_x86_64" }
      ]
    },
    {
      "platform_name": "Other Runtime",
      "platform_vendor": "Other",
      "device_name": "Other Accel",
      "device_vendor": "Other",
      "supported_drivers": [],
      "supported_backend_targets": []
    }
  ]
}"#;

fn descriptor() -> Descriptor {
    serde_json::from_str(DESCRIPTOR).unwrap()
}

/// Two platforms; only the Acme one overlaps the descriptor, and its
/// accelerator is not advertised.
fn machine() -> InMemoryApi {
    let mut api = InMemoryApi::new();
    api.add_platform("Acme OpenCL ", "Acme Corp")
        .with_device(MemoryDevice::new("Acme GPU\0", "Acme Corp", DeviceType::Gpu))
        .with_device(MemoryDevice::new("Acme CPU", "Acme Corp", DeviceType::Cpu))
        .with_device(MemoryDevice::new("Acme FPGA", "Acme Corp", DeviceType::Accelerator));
    api.add_platform("Portable Runtime", "PoCL")
        .with_device(MemoryDevice::new("pthread", "PoCL", DeviceType::Cpu));
    api
}

/// Platform and device records with every payload field, since
/// `PlatformSet` equality only looks at platform keys.
type Contents = Vec<(String, String, Vec<(String, String, Vec<String>)>)>;

fn contents(platforms: &PlatformSet) -> Contents {
    platforms
        .iter()
        .map(|p| {
            let devices = p
                .devices
                .iter()
                .map(|d| (d.name().to_string(), d.vendor().to_string(), d.drivers.clone()))
                .collect();
            (p.name().to_string(), p.vendor().to_string(), devices)
        })
        .collect()
}

fn hardware(filter: &DeviceFilter) -> PlatformSet {
    let api = machine();
    let handles = find_devices(&api, filter, true, &VendorAliases::new());
    PlatformSet::from_hardware(&describe(&api, &handles))
}

#[test]
fn matched_set_is_the_keyed_intersection() {
    let hardware = hardware(&DeviceFilter::any());
    assert_eq!(hardware.len(), 2);
    assert_eq!(hardware.device_count(), 4);

    let matched = match_descriptor(&descriptor(), &hardware);
    assert_eq!(matched.len(), 1);
    let platform = matched.nth(0).unwrap();
    assert_eq!(platform.name(), "Acme OpenCL");
    let devices: Vec<&str> = platform.devices.iter().map(|d| d.name()).collect();
    assert_eq!(devices, ["Acme CPU", "Acme GPU"]);

    let gpu = platform
        .devices
        .get(&RecordKey::new("Acme GPU", "Acme Corp"))
        .unwrap();
    assert_eq!(gpu.drivers, ["2.0", "1.2"]);
}

#[test]
fn matching_is_deterministic() {
    let hardware = hardware(&DeviceFilter::any());
    let descriptor = descriptor();
    let first = contents(&match_descriptor(&descriptor, &hardware));
    let second = contents(&match_descriptor(&descriptor, &hardware));
    assert_eq!(first, second);
    assert_eq!(first[0].2.len(), 2);
}

#[test]
fn platform_set_equality_ignores_devices() {
    let mut with_device = Platform::new("Acme OpenCL", "Acme Corp");
    with_device.devices.insert(Device::new("Acme GPU", "Acme Corp"));
    let with_device: PlatformSet = [with_device].into_iter().collect();
    let bare: PlatformSet = [Platform::new("Acme OpenCL", "Acme Corp")].into_iter().collect();

    assert_eq!(with_device, bare);
    assert_ne!(contents(&with_device), contents(&bare));
}

#[test]
fn device_filter_narrows_the_match() {
    let gpus = DeviceFilter::resolve("gpu", "").unwrap();
    let matched = match_descriptor(&descriptor(), &hardware(&gpus));
    assert_eq!(matched.device_count(), 1);

    let other_vendor = DeviceFilter::resolve("pocl", "").unwrap();
    assert!(match_descriptor(&descriptor(), &hardware(&other_vendor)).is_empty());
}

#[test]
fn selected_configuration_resolves_to_its_backend() {
    let matched = match_descriptor(&descriptor(), &hardware(&DeviceFilter::any()));
    let descriptor = descriptor();

    let gpu = select_config(&matched, ConfigSelector::new(1, 2)).unwrap();
    assert_eq!(
        gpu,
        Config {
            platform: "Acme OpenCL".into(),
            device: "Acme GPU".into(),
        }
    );
    assert_eq!(
        resolve_backend(&gpu, &descriptor, ""),
        BackendInfo {
            backend: "spirv64".into(),
            device_flags: "-fsycl-targets=spir64".into(),
        }
    );
    assert_eq!(
        resolve_backend(&gpu, &descriptor, "ptx64").device_flags,
        "-fsycl-targets=nvptx64"
    );
    assert!(resolve_backend(&gpu, &descriptor, "cuda").is_empty());

    let cpu = select_config(&matched, "1:1".parse().unwrap()).unwrap();
    assert_eq!(
        resolve_backend(&cpu, &descriptor, "").device_flags,
        "-fsycl-targets=spir64_x86_64"
    );
}

#[test]
fn out_of_range_selection_is_none() {
    let matched = match_descriptor(&descriptor(), &hardware(&DeviceFilter::any()));
    for selector in ["0:1", "1:0", "2:1", "1:3", "0:0"] {
        assert_eq!(select_config(&matched, selector.parse().unwrap()), None, "{selector}");
    }
    assert_eq!(select_config(&PlatformSet::new(), ConfigSelector::new(1, 1)), None);
}

#[test]
fn catalog_index_resolution() {
    let mut second = descriptor();
    second.name = "Second SYCL".into();
    let catalog: Catalog = [descriptor(), second].into_iter().collect();

    assert_eq!(catalog.resolve_index("2"), Some(2));
    assert_eq!(catalog.resolve_index("Acme SYCL"), Some(1));
    assert_eq!(catalog.resolve_index("NonExistentName"), None);
    assert_eq!(catalog.resolve_index("3"), None);
    assert_eq!(
        catalog.resolve("Second SYCL").map(|(i, d)| (i, d.version.as_str())),
        Some((2, "2.1.0"))
    );
}
