//! Reuse error types

use listing_types::ListingId;
use services_listing_host::HostError;
use thiserror::Error;

/// Errors surfaced by reuse operations
///
/// No variant leaves partial state behind: every operation runs its
/// fallible steps before it commits a rename.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReuseError {
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    NotAccessible(String),

    #[error("Not in a directory listing")]
    NotApplicable,

    #[error("Listing name already in use: {0}")]
    NameInUse(String),

    #[error("No file on this line")]
    NoEntryAtPoint,

    #[error("Already at the root directory: {0}")]
    AtRoot(String),

    #[error("Persistent listing name is disabled")]
    PersistenceDisabled,

    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),
}

impl From<HostError> for ReuseError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::NotFound(path) => ReuseError::NotFound(path),
            HostError::NotAccessible(path) => ReuseError::NotAccessible(path),
            HostError::NotADirectory(path) => ReuseError::NotADirectory(path),
            HostError::NameInUse(name) => ReuseError::NameInUse(name),
            HostError::ListingNotFound(id) => ReuseError::ListingNotFound(id),
        }
    }
}
