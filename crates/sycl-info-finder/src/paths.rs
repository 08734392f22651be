//! Descriptor search locations.

use std::path::{Path, PathBuf};

/// Environment variable listing descriptor directories, separated by `;`.
pub const VENDOR_PATHS_ENV: &str = "SYCL_VENDOR_PATHS";

/// Split `value` on `separator`, dropping fragments of one character or
/// less.
pub fn split_paths(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .filter(|fragment| fragment.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Directories to scan: those in `env_value` (the content of
/// [`VENDOR_PATHS_ENV`]), then `hint`.
pub fn search_paths(env_value: Option<&str>, hint: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = env_value
        .map(|value| split_paths(value, ';'))
        .unwrap_or_default()
        .into_iter()
        .map(PathBuf::from)
        .collect();
    if let Some(hint) = hint {
        if !hint.as_os_str().is_empty() {
            paths.push(hint.to_path_buf());
        }
    }
    paths
}

/// [`search_paths`] with the environment read from the process.
pub fn search_paths_from_env(hint: Option<&Path>) -> Vec<PathBuf> {
    let env_value = std::env::var(VENDOR_PATHS_ENV).ok();
    search_paths(env_value.as_deref(), hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_drops_short_fragments() {
        assert_eq!(split_paths("/opt/a;/opt/b", ';'), ["/opt/a", "/opt/b"]);
        assert_eq!(split_paths("/opt/a;;x;/b", ';'), ["/opt/a", "/b"]);
        assert_eq!(split_paths(";", ';'), Vec::<String>::new());
        assert!(split_paths("", ';').is_empty());
    }

    #[test]
    fn split_keeps_trailing_fragment() {
        assert_eq!(split_paths("ab;cd;", ';'), ["ab", "cd"]);
    }

    #[test]
    fn env_paths_then_hint() {
        let paths = search_paths(Some("/env/one;/env/two"), Some(Path::new("/hint")));
        assert_eq!(
            paths,
            [
                PathBuf::from("/env/one"),
                PathBuf::from("/env/two"),
                PathBuf::from("/hint")
            ]
        );
    }

    #[test]
    fn nothing_configured() {
        assert!(search_paths(None, None).is_empty());
        assert!(search_paths(Some(""), Some(Path::new(""))).is_empty());
    }
}
