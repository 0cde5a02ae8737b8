//! Script name derivation from file paths.
//!
//! A script registered from disk takes its logical name from the file's
//! base name with the extension stripped: `scripts/incr.lua` registers as
//! `incr`.

use std::path::Path;

/// Derive the logical script name for a file path.
///
/// Returns the base name with its extension stripped, or `None` when the
/// path has no usable stem (an empty path, or one ending in `..`).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use shacache_core::naming::script_name_from_path;
///
/// assert_eq!(script_name_from_path(Path::new("scripts/incr.lua")), Some("incr".to_string()));
/// assert_eq!(script_name_from_path(Path::new("decr.lua")), Some("decr".to_string()));
/// assert_eq!(script_name_from_path(Path::new("")), None);
/// ```
pub fn script_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
}
