//! Loading `.syclinfo` descriptors from disk.

use std::path::{Path, PathBuf};

use sycl_info_matchers::{Catalog, Descriptor};
use tracing::{debug, warn};

use crate::error::{FinderError, Result};

/// File-name suffix of descriptor files.
pub const DESCRIPTOR_SUFFIX: &str = ".syclinfo";

/// Returns true if `file_name` names a descriptor file.
pub fn is_descriptor_file(file_name: &str) -> bool {
    file_name.ends_with(DESCRIPTOR_SUFFIX)
}

/// Parse a descriptor from a JSON string.
pub fn parse_descriptor(json: &str) -> Result<Descriptor> {
    let descriptor: Descriptor = serde_json::from_str(json)?;
    Ok(descriptor)
}

/// Load a descriptor from a file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor> {
    if !path.exists() {
        return Err(FinderError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_descriptor(&content).map_err(|e| match e {
        FinderError::Parse(source) => FinderError::Json {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Descriptor files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn discover_descriptor_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_descriptor = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_descriptor_file);
        if is_descriptor && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every descriptor found in `paths`, in path order.
///
/// Unreadable directories and malformed files are logged and skipped.
pub fn find_descriptors(paths: &[PathBuf]) -> Vec<Descriptor> {
    let mut descriptors = Vec::new();
    for dir in paths {
        let files = match discover_descriptor_files(dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Unable to scan {}: {e}", dir.display());
                continue;
            }
        };
        debug!("{} descriptor file(s) in {}", files.len(), dir.display());
        for file in files {
            match load_descriptor(&file) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => warn!("Skipping {}: {e}", file.display()),
            }
        }
    }
    descriptors
}

/// Load the catalog from `paths`.
pub fn load_catalog(paths: &[PathBuf]) -> Catalog {
    Catalog::new(find_descriptors(paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_json(name: &str) -> String {
        format!(
            r#"{{
  "name": "{name}",
  "version": "1.0.0",
  "vendor": "Acme",
  "supported_configurations": [
    {{
      "platform_name": "OpenCL",
      "platform_vendor": "Acme",
      "device_name": "GPU0",
      "device_vendor": "Acme",
      "supported_drivers": ["1.2"],
      "supported_backend_targets": [
        {{ "backend_target": "spirv", "device_flags": "-x spir" }}
      ]
    }}
  ]
}}"#
        )
    }

    #[test]
    fn suffix_check() {
        assert!(is_descriptor_file("computecpp.syclinfo"));
        assert!(is_descriptor_file(".syclinfo"));
        assert!(!is_descriptor_file("computecpp.syclinfo.bak"));
        assert!(!is_descriptor_file("notes.txt"));
    }

    #[test]
    fn parse_full_descriptor() {
        let d = parse_descriptor(&descriptor_json("Acme SYCL")).unwrap();
        assert_eq!(d.name, "Acme SYCL");
        let backend = &d.supported_configurations[0].supported_backend_targets[0];
        assert_eq!(backend.device_flags, "-x spir");
    }

    #[test]
    fn parse_invalid_returns_error() {
        let err = parse_descriptor("{ not json").unwrap_err();
        assert!(matches!(err, FinderError::Parse(_)));
        assert!(parse_descriptor(r#"{ "name": "no version" }"#).is_err());
    }

    #[test]
    fn load_reports_the_malformed_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.syclinfo");
        std::fs::write(&path, r#"{ "name": "no version" }"#).unwrap();

        let err = load_descriptor(&path).unwrap_err();
        assert!(matches!(&err, FinderError::Json { path: p, .. } if *p == path));
        assert!(err.to_string().contains("broken.syclinfo"));
    }

    #[test]
    fn load_not_found() {
        let result = load_descriptor(Path::new("/nonexistent/impl.syclinfo"));
        assert!(matches!(result.unwrap_err(), FinderError::NotFound { .. }));
    }

    #[test]
    fn finds_descriptors_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.syclinfo"), descriptor_json("Second")).unwrap();
        std::fs::write(dir.path().join("a.syclinfo"), descriptor_json("First")).unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignore me").unwrap();

        let descriptors = find_descriptors(&[dir.path().to_path_buf()]);
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn malformed_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.syclinfo"), descriptor_json("Good")).unwrap();
        std::fs::write(dir.path().join("bad.syclinfo"), "{ broken").unwrap();

        let err = load_descriptor(&dir.path().join("bad.syclinfo")).unwrap_err();
        assert!(matches!(err, FinderError::Json { .. }));

        let descriptors = find_descriptors(&[dir.path().to_path_buf()]);
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "Good");
    }

    #[test]
    fn paths_are_scanned_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("z.syclinfo"), descriptor_json("FromFirst")).unwrap();
        std::fs::write(second.path().join("a.syclinfo"), descriptor_json("FromSecond")).unwrap();

        let catalog = load_catalog(&[
            first.path().to_path_buf(),
            PathBuf::from("/nonexistent/dir"),
            second.path().to_path_buf(),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "FromFirst");
        assert_eq!(catalog.resolve_index("FromSecond"), Some(2));
    }

    #[test]
    fn empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_descriptor_files(dir.path()).unwrap().is_empty());
        assert!(find_descriptors(&[]).is_empty());
    }
}
