//! Filename normalization for ZoKrates artifacts.
//!
//! All helpers are idempotent: applying them to an already-normalized name is a no-op.

use std::ffi::OsString;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Extension of ZoKrates source files.
pub const SOURCE_EXTENSION: &str = ".zok";

/// Extension of the typed intermediate form written next to a compiled binary.
pub const TYPED_EXTENSION: &str = ".ztf";

pub const JSON_EXTENSION: &str = ".json";
pub const KEY_EXTENSION: &str = ".key";
pub const SOLIDITY_EXTENSION: &str = ".sol";

/// Append `suffix` unless `name` already ends with it.
pub fn ensure_suffix(name: &str, suffix: &str) -> String {
    if name.ends_with(suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// Remove a single trailing `suffix` if present.
pub fn trim_suffix(name: &str, suffix: &str) -> String {
    name.strip_suffix(suffix).unwrap_or(name).to_string()
}

/// Append `suffix` to a path unless it already ends with it.
pub fn ensure_path_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    if !path.to_string_lossy().ends_with(suffix) {
        raw.push(suffix);
    }
    PathBuf::from(raw)
}

/// True if the path's textual form ends with any of `suffixes`.
pub fn has_any_suffix(path: &Path, suffixes: &[&str]) -> bool {
    let text = path.to_string_lossy();
    suffixes.iter().any(|s| text.ends_with(s))
}

/// Make sure a directory path ends with a separator.
pub fn with_trailing_separator(dir: &Path) -> OsString {
    let mut raw = dir.as_os_str().to_owned();
    let text = dir.to_string_lossy();
    if !text.ends_with('/') && !text.ends_with(MAIN_SEPARATOR) {
        raw.push(MAIN_SEPARATOR.to_string());
    }
    raw
}

/// `<dir>/<name>`, with exactly the separator the caller did or did not supply.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    let mut raw = with_trailing_separator(dir);
    raw.push(name);
    PathBuf::from(raw)
}
