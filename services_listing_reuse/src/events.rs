//! Audit trail events
//!
//! One event per committed change, in the order the host observed it.

use listing_types::ListingId;
use serde::{Deserialize, Serialize};

/// Reuse event for audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReuseEvent {
    /// A listing was repointed at another directory
    Replaced {
        listing: ListingId,
        from: String,
        to: String,
    },
    /// A new listing was opened
    Opened { listing: ListingId, directory: String },
    /// A file was opened in a separate surface
    FileVisited { path: String },
    /// A listing changed its name
    Renamed {
        listing: ListingId,
        from: String,
        to: String,
    },
    /// A listing was destroyed to free the persistent name
    Evicted { listing: ListingId, name: String },
    /// Focus moved to a listing
    Focused { listing: ListingId },
    /// A directory prompt was cancelled
    PromptCancelled { label: String },
}

impl ReuseEvent {
    /// Returns the listing the event concerns, if any
    pub fn listing(&self) -> Option<ListingId> {
        match self {
            ReuseEvent::Replaced { listing, .. }
            | ReuseEvent::Opened { listing, .. }
            | ReuseEvent::Renamed { listing, .. }
            | ReuseEvent::Evicted { listing, .. }
            | ReuseEvent::Focused { listing } => Some(*listing),
            ReuseEvent::FileVisited { .. } | ReuseEvent::PromptCancelled { .. } => None,
        }
    }
}
