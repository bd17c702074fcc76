//! Cross-platform path utilities for Locator
//!
//! Classification always operates on bundle-relative paths with forward-slash
//! separators, regardless of the host platform's conventions. These helpers
//! keep that normalization in one place.

use std::path::Path;

/// Convert a path to a forward-slash string.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use locator::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("models/flickr.js")), "models/flickr.js");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Join a relative prefix and an entry name with a forward slash.
///
/// An empty prefix yields the name unchanged, so bundle-root entries never
/// carry a leading slash.
pub fn join_rel(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Last segment of a forward-slash relative path.
pub fn base_name(rel_path: &str) -> &str {
    rel_path.rsplit('/').next().unwrap_or(rel_path)
}
