//! # Listing Names
//!
//! Pure path and name logic for directory listings.
//!
//! ## Philosophy
//!
//! - **Names are derived, not stored**: A listing's path-derived name is always
//!   recomputed from its bound directory
//! - **No filesystem access**: Everything here is string manipulation, so the
//!   same rules hold for every host
//! - **Collisions are the caller's problem**: Uniquification only runs against
//!   names the caller says are taken

pub mod path;
pub mod unique;

pub use path::{ListingPaths, PathError};
pub use unique::{uniquify, UNIQUE_SUFFIX_START};

/// Computes the user-facing display form of a directory path
///
/// Normalizes the path (trailing separator removed, `.` and `..` collapsed)
/// and abbreviates it relative to `home` when possible. Paths that cannot be
/// normalized are only stripped of trailing separators.
///
/// # Examples
///
/// ```
/// use listing_names::display_name;
///
/// assert_eq!(display_name("/home/ana/src/", Some("/home/ana")), "~/src");
/// assert_eq!(display_name("/etc/", None), "/etc");
/// ```
pub fn display_name(path: &str, home: Option<&str>) -> String {
    let normalized = ListingPaths::normalize(path).unwrap_or_else(|_| {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            path.to_string()
        } else {
            trimmed.to_string()
        }
    });

    match home {
        Some(home) => ListingPaths::abbreviate(&normalized, home),
        None => normalized,
    }
}
