//! # Listing Console
//!
//! A line-based front end for the listing reuse service, running against the
//! simulated host. It is NOT a file manager; it exists to drive and observe
//! the reuse rules deterministically.

pub mod commands;
pub mod session;

pub use commands::{CommandError, ListingCommand, ListingCommandParser};
pub use session::{ListingSession, SessionError};
