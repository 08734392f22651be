//! Normalization of strings returned by the compute API.

/// Strip a single trailing space or NUL from `s`.
///
/// Info queries return fixed-size buffers that usually end in a terminator;
/// only the last character is inspected, so `"abc  "` becomes `"abc "`.
pub fn trim_end(s: &str) -> &str {
    s.strip_suffix([' ', '\0']).unwrap_or(s)
}

/// Owned variant of [`trim_end`], reusing the allocation.
pub fn trim_end_owned(mut s: String) -> String {
    if s.ends_with([' ', '\0']) {
        s.pop();
    }
    s
}
