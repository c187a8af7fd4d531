#![no_std]

//! # Listing Types
//!
//! This crate defines the shared value types of the listing reuse system.
//!
//! ## Philosophy
//!
//! - **One listing, many directories**: A listing is a surface whose bound
//!   directory changes over time while its identity stays the same
//! - **Names are identity**: Listing names are unique among open listings
//! - **Requests are transient**: Navigation requests are built per user action
//!   and never stored
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer for directory contents
//! - A filesystem abstraction
//! - An input event model

extern crate alloc;

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an open listing
///
/// Stays stable while the listing is repointed at other directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Creates a new unique listing ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ListingId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing:{}", self.0)
    }
}

/// Snapshot of an open directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identity
    pub id: ListingId,
    /// Display name, unique among open listings
    pub name: String,
    /// Directory currently displayed
    pub directory: String,
}

impl Listing {
    /// Creates a new listing snapshot
    pub fn new(id: ListingId, name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            directory: directory.into(),
        }
    }

    /// Checks whether this listing currently holds the given name
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Kind of a filesystem entry as seen from a listing line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A directory; navigating to it reuses the listing
    Directory,
    /// A regular file; navigating to it opens a separate surface
    File,
}

/// The entry under the focus line of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedEntry {
    /// Entry kind
    pub kind: EntryKind,
    /// Absolute path of the entry
    pub path: String,
}

impl FocusedEntry {
    /// Creates a directory entry
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Directory,
            path: path.into(),
        }
    }

    /// Creates a file entry
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::File,
            path: path.into(),
        }
    }

    /// Returns true if the entry is a file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A single navigation request issued from a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationRequest {
    /// Navigate to an explicit path, always treated as a directory
    Explicit(String),
    /// Navigate to whatever the focused line of the current listing denotes
    FocusedEntry,
}

impl NavigationRequest {
    /// Builds a request from an optional explicit path
    pub fn from_optional(path: Option<String>) -> Self {
        match path {
            Some(path) => NavigationRequest::Explicit(path),
            None => NavigationRequest::FocusedEntry,
        }
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The current listing was repointed at `target` in place
    ReplaceInPlace { target: String },
    /// `target` was opened in a new surface
    OpenNewAndVisit {
        target: String,
        via_other_surface: bool,
    },
}

impl Action {
    /// Returns the navigation target
    pub fn target(&self) -> &str {
        match self {
            Action::ReplaceInPlace { target } => target,
            Action::OpenNewAndVisit { target, .. } => target,
        }
    }

    /// Returns true if the listing was reused
    pub fn is_replace(&self) -> bool {
        matches!(self, Action::ReplaceInPlace { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ReplaceInPlace { target } => write!(f, "replaced -> {}", target),
            Action::OpenNewAndVisit { target, .. } => write!(f, "visited {}", target),
        }
    }
}

/// Answer to an interactive directory prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptResponse {
    /// The user supplied a path
    Path(String),
    /// The user aborted the prompt
    Cancelled,
}
