//! Path normalization and resolution
//!
//! Listings are always bound to absolute, normalized directory paths.

use thiserror::Error;

/// Errors that can occur during path normalization
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path does not start at the root
    #[error("Not an absolute path: {0}")]
    NotAbsolute(String),
}

/// Path helpers for listing directories
pub struct ListingPaths;

impl ListingPaths {
    /// Normalizes an absolute path
    ///
    /// Collapses repeated separators, `.` and `..` components, and removes the
    /// trailing separator. `..` at the root stays at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_names::ListingPaths;
    ///
    /// assert_eq!(ListingPaths::normalize("/a//b/./c/../").unwrap(), "/a/b");
    /// assert_eq!(ListingPaths::normalize("/..").unwrap(), "/");
    /// ```
    pub fn normalize(path: &str) -> Result<String, PathError> {
        if path.is_empty() {
            return Err(PathError::InvalidPath("Empty path".to_string()));
        }
        if !path.starts_with('/') {
            return Err(PathError::NotAbsolute(path.to_string()));
        }

        let mut components: Vec<&str> = Vec::new();
        for component in path.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    components.pop();
                }
                other => components.push(other),
            }
        }

        Ok(format!("/{}", components.join("/")))
    }

    /// Resolves `path` against `base`
    ///
    /// Absolute paths ignore `base`. `~` and `~/...` are left to the host and
    /// treated as relative names here.
    pub fn resolve(base: &str, path: &str) -> Result<String, PathError> {
        if path.is_empty() {
            return Err(PathError::InvalidPath("Empty path".to_string()));
        }
        if path.starts_with('/') {
            return Self::normalize(path);
        }
        Self::normalize(&format!("{}/{}", base.trim_end_matches('/'), path))
    }

    /// Returns the parent directory of a normalized path
    ///
    /// Returns None for the root.
    pub fn parent(path: &str) -> Option<String> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.rfind('/') {
            Some(0) => Some("/".to_string()),
            Some(idx) => Some(trimmed[..idx].to_string()),
            None => None,
        }
    }

    /// Abbreviates `path` relative to `home`
    ///
    /// `home` itself becomes `~`; paths below it become `~/rest`.
    pub fn abbreviate(path: &str, home: &str) -> String {
        let home = home.trim_end_matches('/');
        if home.is_empty() {
            return path.to_string();
        }
        if path == home {
            return "~".to_string();
        }
        match path.strip_prefix(home) {
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trailing_slash() {
        assert_eq!(ListingPaths::normalize("/docs/").unwrap(), "/docs");
    }

    #[test]
    fn test_normalize_dot_components() {
        assert_eq!(ListingPaths::normalize("/a/./b/../c").unwrap(), "/a/c");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(ListingPaths::normalize("/").unwrap(), "/");
        assert_eq!(ListingPaths::normalize("/../..").unwrap(), "/");
    }

    #[test]
    fn test_normalize_empty() {
        let result = ListingPaths::normalize("");
        assert!(matches!(result, Err(PathError::InvalidPath(_))));
    }

    #[test]
    fn test_normalize_relative() {
        let result = ListingPaths::normalize("docs");
        assert_eq!(result, Err(PathError::NotAbsolute("docs".to_string())));
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(ListingPaths::resolve("/a/b", "c").unwrap(), "/a/b/c");
        assert_eq!(ListingPaths::resolve("/a/b", "..").unwrap(), "/a");
        assert_eq!(ListingPaths::resolve("/", "..").unwrap(), "/");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(ListingPaths::resolve("/a/b", "/x/").unwrap(), "/x");
    }

    #[test]
    fn test_parent() {
        assert_eq!(ListingPaths::parent("/a/b"), Some("/a".to_string()));
        assert_eq!(ListingPaths::parent("/a"), Some("/".to_string()));
        assert_eq!(ListingPaths::parent("/"), None);
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(ListingPaths::abbreviate("/home/ana", "/home/ana"), "~");
        assert_eq!(ListingPaths::abbreviate("/home/ana/x", "/home/ana"), "~/x");
        assert_eq!(ListingPaths::abbreviate("/home/anaconda", "/home/ana"), "/home/anaconda");
        assert_eq!(ListingPaths::abbreviate("/etc", "/"), "/etc");
    }
}
