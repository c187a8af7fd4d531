//! # Listing Reuse Service
//!
//! Keeps one directory listing alive across repeated navigation instead of
//! opening a new listing per visited directory.
//!
//! ## Philosophy
//!
//! - **Reuse over spawn**: Navigating to a directory repoints the current
//!   listing; only files open a separate surface
//! - **One home**: At most one listing holds the persistent (magic) name, and
//!   navigation never takes it away
//! - **Commit last**: Every fallible step runs before the rename that claims
//!   the persistent name
//! - **Auditable**: Every committed change is recorded as a [`ReuseEvent`]
//!
//! ## Operations
//!
//! - `reuse(request)`: Replace the current listing in place, or visit a file
//! - `navigate_up()`: Reuse the listing for the parent directory
//! - `navigate_at(path)`: Focus an entry, then reuse
//! - `goto_home(path)`: Jump to (or create) the persistent listing
//! - `toggle_naming()`: Swap the current listing between persistent and
//!   path-derived names

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod manager;
pub mod names;

pub use config::{ConfigError, ReuseConfig, DEFAULT_MAGIC_BUFFER_NAME};
pub use controller::ReuseController;
pub use error::ReuseError;
pub use events::ReuseEvent;
pub use manager::{HomeOutcome, PersistentViewManager, ToggleOutcome};
pub use names::NamePolicy;
