//! # Listing Host Service
//!
//! This crate defines the contract between the listing reuse core and the
//! environment that actually owns directory listings.
//!
//! ## Philosophy
//!
//! - **The host owns listings**: Rendering, reading directories and capturing
//!   input all live behind [`ListingHost`]
//! - **Names are a registry**: The host keeps one name table and refuses
//!   duplicate names
//! - **Errors are verbatim**: Host failures are reported as-is, never retried
//! - **Deterministic simulation**: [`SimListingHost`] backs tests and the console
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A directory renderer
//! - A real filesystem binding
//! - An input event loop

pub mod sim;

pub use sim::SimListingHost;

use listing_types::{EntryKind, FocusedEntry, Listing, ListingId, PromptResponse};
use thiserror::Error;

/// Listing host error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    NotAccessible(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Listing name already in use: {0}")]
    NameInUse(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),
}

/// Collaborator contract implemented by a directory-listing environment
///
/// All calls are issued one at a time, in order, from a single request.
pub trait ListingHost {
    /// Looks up an open listing by name
    fn lookup_listing(&self, name: &str) -> Option<Listing>;

    /// Returns a snapshot of a listing by ID
    fn listing(&self, id: ListingId) -> Option<Listing>;

    /// Returns the focused listing
    ///
    /// Returns None when focus is on something that is not a listing.
    fn current_listing(&self) -> Option<Listing>;

    /// Returns the entry under the focus line of a listing, if any
    fn focused_entry(&self, id: ListingId) -> Option<FocusedEntry>;

    /// Moves the focus line of a listing onto `path`
    ///
    /// Returns Ok(false) if the listing shows no such entry.
    fn focus_entry(&mut self, id: ListingId, path: &str) -> Result<bool, HostError>;

    /// Reports the kind of an existing path
    fn entry_kind(&self, path: &str) -> Result<EntryKind, HostError>;

    /// Repoints an existing listing at another directory
    ///
    /// The listing keeps its identity. The host may give it a new
    /// path-derived name.
    fn replace_contents(&mut self, id: ListingId, path: &str) -> Result<(), HostError>;

    /// Opens a directory in a new listing and focuses it
    fn open_listing(&mut self, path: &str) -> Result<Listing, HostError>;

    /// Opens a file in a separate surface
    fn open_file(&mut self, path: &str) -> Result<(), HostError>;

    /// Gives input focus to a listing
    fn focus_listing(&mut self, id: ListingId) -> Result<(), HostError>;

    /// Renames a listing
    ///
    /// Fails with [`HostError::NameInUse`] if another listing holds `name`.
    fn rename_listing(&mut self, id: ListingId, name: &str) -> Result<(), HostError>;

    /// Destroys a listing
    fn destroy_listing(&mut self, id: ListingId) -> Result<(), HostError>;

    /// Names of all open listings
    fn listing_names(&self) -> Vec<String>;

    /// Asks the user for a directory
    ///
    /// This is the only suspension point of a request.
    fn prompt_for_directory(&mut self, label: &str, default_dir: &str) -> PromptResponse;

    /// Display form of a directory path
    fn abbreviate_and_normalize(&self, path: &str) -> String {
        listing_names::display_name(path, None)
    }

    /// Directory used when no listing provides one
    fn default_directory(&self) -> String;
}
