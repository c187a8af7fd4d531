//! Reuse controller
//!
//! Decides, per navigation request, whether the current listing is repointed
//! in place or a file is visited in a separate surface, and reasserts the
//! persistent name after a repoint.

use crate::config::ReuseConfig;
use crate::error::ReuseError;
use crate::events::ReuseEvent;
use listing_names::ListingPaths;
use listing_types::{Action, FocusedEntry, Listing, ListingId, NavigationRequest};
use services_listing_host::{HostError, ListingHost};
use tracing::{debug, error, info, warn};

/// Reuse controller
///
/// Holds the injected configuration and the audit trail. The host is
/// borrowed per request.
pub struct ReuseController {
    /// Immutable configuration
    config: ReuseConfig,
    /// Audit trail of committed changes
    audit_trail: Vec<ReuseEvent>,
}

impl ReuseController {
    /// Creates a new controller
    pub fn new(config: ReuseConfig) -> Self {
        Self {
            config,
            audit_trail: Vec::new(),
        }
    }

    /// Returns the configuration
    pub fn config(&self) -> &ReuseConfig {
        &self.config
    }

    /// Returns the audit trail
    pub fn audit_trail(&self) -> &[ReuseEvent] {
        &self.audit_trail
    }

    /// Clears the audit trail
    pub fn clear_audit_trail(&mut self) {
        self.audit_trail.clear();
    }

    pub(crate) fn record(&mut self, event: ReuseEvent) {
        self.audit_trail.push(event);
    }

    /// Handles one navigation request from the current listing
    ///
    /// Directories replace the listing's contents in place; files are opened
    /// in a separate surface and never replace the listing.
    pub fn reuse(
        &mut self,
        host: &mut dyn ListingHost,
        request: NavigationRequest,
    ) -> Result<Action, ReuseError> {
        let current = host.current_listing().ok_or(ReuseError::NotApplicable)?;

        let entry = match request {
            NavigationRequest::Explicit(path) => {
                let target = ListingPaths::resolve(&current.directory, &path)
                    .map_err(|_| ReuseError::NotFound(path.clone()))?;
                FocusedEntry::directory(target)
            }
            NavigationRequest::FocusedEntry => host
                .focused_entry(current.id)
                .ok_or(ReuseError::NoEntryAtPoint)?,
        };

        if entry.is_file() {
            debug!(path = %entry.path, "visiting file in other surface");
            host.open_file(&entry.path).map_err(surface)?;
            self.record(ReuseEvent::FileVisited {
                path: entry.path.clone(),
            });
            return Ok(Action::OpenNewAndVisit {
                target: entry.path,
                via_other_surface: true,
            });
        }

        self.replace_in_place(host, &current, &entry.path)?;
        Ok(Action::ReplaceInPlace { target: entry.path })
    }

    /// Reuses the current listing for its parent directory
    ///
    /// The focus line ends up on the directory that was left.
    pub fn navigate_up(&mut self, host: &mut dyn ListingHost) -> Result<Action, ReuseError> {
        let current = host.current_listing().ok_or(ReuseError::NotApplicable)?;
        let parent = ListingPaths::parent(&current.directory)
            .ok_or_else(|| ReuseError::AtRoot(current.directory.clone()))?;

        let action = self.reuse(host, NavigationRequest::Explicit(parent))?;
        if !host.focus_entry(current.id, &current.directory)? {
            debug!(directory = %current.directory, "left directory not shown in parent");
        }
        Ok(action)
    }

    /// Moves the focus line onto `path`, then reuses the listing for it
    pub fn navigate_at(
        &mut self,
        host: &mut dyn ListingHost,
        path: &str,
    ) -> Result<Action, ReuseError> {
        let current = host.current_listing().ok_or(ReuseError::NotApplicable)?;
        if !host.focus_entry(current.id, path)? {
            return Err(ReuseError::NoEntryAtPoint);
        }
        self.reuse(host, NavigationRequest::FocusedEntry)
    }

    /// Repoints `listing` at `target` and reasserts the persistent name
    ///
    /// The rename only runs after the host accepted the new directory.
    pub(crate) fn replace_in_place(
        &mut self,
        host: &mut dyn ListingHost,
        listing: &Listing,
        target: &str,
    ) -> Result<(), ReuseError> {
        let prior_name = listing.name.as_str();
        host.replace_contents(listing.id, target).map_err(surface)?;
        debug!(listing = %listing.id, from = %listing.directory, to = %target, "listing reused");
        self.record(ReuseEvent::Replaced {
            listing: listing.id,
            from: listing.directory.clone(),
            to: target.to_string(),
        });

        if self.config.is_magic(prior_name) {
            let after = host
                .listing(listing.id)
                .ok_or(ReuseError::ListingNotFound(listing.id))?;
            let magic = self.config.magic_buffer_name.clone();
            self.rename(host, listing.id, &after.name, &magic)?;
        }
        Ok(())
    }

    /// Renames a listing and records it
    pub(crate) fn rename(
        &mut self,
        host: &mut dyn ListingHost,
        id: ListingId,
        from: &str,
        to: &str,
    ) -> Result<(), ReuseError> {
        if from == to {
            return Ok(());
        }

        host.rename_listing(id, to).map_err(|err| {
            if let HostError::NameInUse(name) = &err {
                error!(listing = %id, name = %name, "name still held by another listing");
            }
            ReuseError::from(err)
        })?;

        info!(listing = %id, from = %from, to = %to, "listing renamed");
        self.record(ReuseEvent::Renamed {
            listing: id,
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }
}

/// Logs a host failure and converts it unchanged
pub(crate) fn surface(err: HostError) -> ReuseError {
    warn!(error = %err, "host refused request");
    ReuseError::from(err)
}
