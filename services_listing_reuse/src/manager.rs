//! Persistent listing manager
//!
//! Jumps to the persistent (home) listing and toggles listings between the
//! persistent name and their path-derived name.

use crate::config::ReuseConfig;
use crate::controller::{surface, ReuseController};
use crate::error::ReuseError;
use crate::events::ReuseEvent;
use crate::names::NamePolicy;
use listing_names::ListingPaths;
use listing_types::{Action, EntryKind, Listing, ListingId, NavigationRequest, PromptResponse};
use services_listing_host::ListingHost;
use tracing::{debug, info};

/// Label shown when asking for the home directory
pub const HOME_PROMPT: &str = "Dired (directory): ";

/// Result of a home jump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeOutcome {
    /// No home existed; a new listing was opened and named
    Opened(Listing),
    /// The home listing was repointed in place
    Replaced(Listing),
    /// Focus moved to the existing home listing
    Focused(Listing),
    /// The directory prompt was cancelled; nothing changed
    Cancelled,
}

/// Result of a naming toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The listing switched to its path-derived name
    PathDerived { name: String },
    /// The listing took the persistent name, evicting its previous holder
    Persistent { evicted: Option<ListingId> },
}

/// Persistent listing manager
///
/// Built on a [`ReuseController`]; shares its configuration and audit trail.
pub struct PersistentViewManager {
    controller: ReuseController,
}

impl PersistentViewManager {
    /// Creates a new manager
    pub fn new(config: ReuseConfig) -> Self {
        Self {
            controller: ReuseController::new(config),
        }
    }

    /// Returns the underlying controller mutably
    pub fn controller_mut(&mut self) -> &mut ReuseController {
        &mut self.controller
    }

    /// Returns the configuration
    pub fn config(&self) -> &ReuseConfig {
        self.controller.config()
    }

    /// Returns the audit trail
    pub fn audit_trail(&self) -> &[ReuseEvent] {
        self.controller.audit_trail()
    }

    /// Navigates from the current listing, reusing it for directories
    pub fn reuse_navigate(
        &mut self,
        host: &mut dyn ListingHost,
        path: Option<String>,
    ) -> Result<Action, ReuseError> {
        self.controller
            .reuse(host, NavigationRequest::from_optional(path))
    }

    /// Jumps to the home listing
    ///
    /// - No home: open `path` (or a prompted directory) and name it home.
    /// - Home is focused: repoint it at `path` (or a prompted directory).
    /// - Home exists elsewhere: focus it, then repoint it if `path` is given.
    pub fn goto_home(
        &mut self,
        host: &mut dyn ListingHost,
        path: Option<&str>,
    ) -> Result<HomeOutcome, ReuseError> {
        if !self.config().use_magic_buffer {
            return Err(ReuseError::PersistenceDisabled);
        }
        let magic = self.config().magic_buffer_name.clone();
        let current = host.current_listing();

        let home = match host.lookup_listing(&magic) {
            None => {
                let Some(directory) = self.resolve_directory(host, path, current.as_ref())? else {
                    return Ok(HomeOutcome::Cancelled);
                };
                let listing = host.open_listing(&directory).map_err(surface)?;
                self.controller.record(ReuseEvent::Opened {
                    listing: listing.id,
                    directory: listing.directory.clone(),
                });
                self.controller
                    .rename(host, listing.id, &listing.name, &magic)?;
                return self.snapshot(host, listing.id).map(HomeOutcome::Opened);
            }
            Some(home) => home,
        };

        let home_is_current = current.as_ref().map(|c| c.id) == Some(home.id);
        if home_is_current {
            return self.reload_home(host, &home, path);
        }

        match path {
            None => {
                self.focus(host, &home)?;
                Ok(HomeOutcome::Focused(home))
            }
            Some(path) => {
                // Validate before focus moves so a bad path changes nothing
                let resolved = self.resolve_directory(host, Some(path), Some(&home))?;
                let Some(directory) = resolved else {
                    return Ok(HomeOutcome::Cancelled);
                };
                self.focus(host, &home)?;
                self.controller.replace_in_place(host, &home, &directory)?;
                self.snapshot(host, home.id).map(HomeOutcome::Replaced)
            }
        }
    }

    /// Swaps the current listing between the persistent and path-derived names
    ///
    /// Taking the persistent name destroys whichever listing held it before.
    /// With persistence disabled only the switch back to the path-derived
    /// name is allowed.
    pub fn toggle_naming(
        &mut self,
        host: &mut dyn ListingHost,
    ) -> Result<ToggleOutcome, ReuseError> {
        let current = host.current_listing().ok_or(ReuseError::NotApplicable)?;
        let magic = self.config().magic_buffer_name.clone();

        if current.is_named(&magic) {
            let name =
                NamePolicy::compute_name(host, &current.directory, Some(current.name.as_str()));
            self.controller
                .rename(host, current.id, &current.name, &name)?;
            return Ok(ToggleOutcome::PathDerived { name });
        }
        if !self.config().use_magic_buffer {
            return Err(ReuseError::PersistenceDisabled);
        }

        let evicted = match host.lookup_listing(&magic) {
            Some(holder) => {
                host.destroy_listing(holder.id).map_err(surface)?;
                info!(listing = %holder.id, name = %magic, "evicted previous holder");
                self.controller.record(ReuseEvent::Evicted {
                    listing: holder.id,
                    name: magic.clone(),
                });
                Some(holder.id)
            }
            None => None,
        };

        self.controller
            .rename(host, current.id, &current.name, &magic)?;
        Ok(ToggleOutcome::Persistent { evicted })
    }

    /// Home is focused: repoint it at `path` or a prompted directory
    fn reload_home(
        &mut self,
        host: &mut dyn ListingHost,
        home: &Listing,
        path: Option<&str>,
    ) -> Result<HomeOutcome, ReuseError> {
        let Some(directory) = self.resolve_directory(host, path, Some(home))? else {
            return Ok(HomeOutcome::Cancelled);
        };
        self.controller.replace_in_place(host, home, &directory)?;
        self.snapshot(host, home.id).map(HomeOutcome::Replaced)
    }

    fn focus(&mut self, host: &mut dyn ListingHost, listing: &Listing) -> Result<(), ReuseError> {
        host.focus_listing(listing.id).map_err(surface)?;
        debug!(listing = %listing.id, "focused home listing");
        self.controller
            .record(ReuseEvent::Focused { listing: listing.id });
        Ok(())
    }

    /// Resolves the target directory, prompting when none was given
    ///
    /// Returns Ok(None) if the prompt was cancelled.
    fn resolve_directory(
        &mut self,
        host: &mut dyn ListingHost,
        path: Option<&str>,
        base: Option<&Listing>,
    ) -> Result<Option<String>, ReuseError> {
        let base_dir = base
            .map(|listing| listing.directory.clone())
            .unwrap_or_else(|| host.default_directory());

        let raw = match path {
            Some(path) => path.to_string(),
            None => match host.prompt_for_directory(HOME_PROMPT, &base_dir) {
                PromptResponse::Path(answer) => answer,
                PromptResponse::Cancelled => {
                    debug!("home prompt cancelled");
                    self.controller.record(ReuseEvent::PromptCancelled {
                        label: HOME_PROMPT.to_string(),
                    });
                    return Ok(None);
                }
            },
        };

        let directory = if raw.trim().is_empty() {
            base_dir
        } else {
            ListingPaths::resolve(&base_dir, &raw)
                .map_err(|_| ReuseError::NotFound(raw.clone()))?
        };

        match host.entry_kind(&directory).map_err(surface)? {
            EntryKind::Directory => Ok(Some(directory)),
            EntryKind::File => Err(ReuseError::NotADirectory(directory)),
        }
    }

    fn snapshot(&self, host: &dyn ListingHost, id: ListingId) -> Result<Listing, ReuseError> {
        host.listing(id).ok_or(ReuseError::ListingNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services_listing_host::SimListingHost;

    fn host() -> SimListingHost {
        let mut host = SimListingHost::new();
        host.add_directory("/a/b");
        host.add_directory("/x/y");
        host.add_file("/a/file.txt");
        host
    }

    #[test]
    fn test_goto_home_opens_new() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());

        let outcome = manager.goto_home(&mut host, Some("/a/b")).unwrap();
        let HomeOutcome::Opened(listing) = outcome else {
            panic!("expected a new listing");
        };
        assert_eq!(listing.name, "*dired*");
        assert_eq!(listing.directory, "/a/b");
        assert_eq!(host.listing_count(), 1);
    }

    #[test]
    fn test_goto_home_prompts_when_no_path() {
        let mut host = host();
        host.queue_prompt_answer(PromptResponse::Path("/x/y".to_string()));
        let mut manager = PersistentViewManager::new(ReuseConfig::default());

        let outcome = manager.goto_home(&mut host, None).unwrap();
        assert!(matches!(outcome, HomeOutcome::Opened(ref l) if l.directory == "/x/y"));
        assert_eq!(host.prompt_log(), [HOME_PROMPT.to_string()]);
    }

    #[test]
    fn test_goto_home_cancelled_changes_nothing() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());

        let outcome = manager.goto_home(&mut host, None).unwrap();
        assert_eq!(outcome, HomeOutcome::Cancelled);
        assert_eq!(host.listing_count(), 0);
        assert_eq!(
            manager.audit_trail(),
            [ReuseEvent::PromptCancelled {
                label: HOME_PROMPT.to_string()
            }]
        );
    }

    #[test]
    fn test_goto_home_rejects_file() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        let result = manager.goto_home(&mut host, Some("/a/file.txt"));
        assert_eq!(
            result,
            Err(ReuseError::NotADirectory("/a/file.txt".to_string()))
        );
        assert_eq!(host.listing_count(), 0);
    }

    #[test]
    fn test_goto_home_focuses_existing() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        let home = match manager.goto_home(&mut host, Some("/a")).unwrap() {
            HomeOutcome::Opened(listing) => listing,
            other => panic!("unexpected outcome: {:?}", other),
        };
        host.open_listing("/x").unwrap();

        let outcome = manager.goto_home(&mut host, None).unwrap();
        assert_eq!(outcome, HomeOutcome::Focused(home.clone()));
        assert_eq!(host.current_listing().map(|l| l.id), Some(home.id));
        assert!(host.prompt_log().is_empty());
    }

    #[test]
    fn test_goto_home_focuses_and_replaces() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        manager.goto_home(&mut host, Some("/a")).unwrap();
        let other = host.open_listing("/x").unwrap();

        let outcome = manager.goto_home(&mut host, Some("/x/y")).unwrap();
        let HomeOutcome::Replaced(home) = outcome else {
            panic!("expected an in-place replace");
        };
        assert_eq!(home.name, "*dired*");
        assert_eq!(home.directory, "/x/y");
        assert_eq!(host.current_listing().map(|l| l.id), Some(home.id));
        assert_eq!(host.listing(other.id).unwrap().directory, "/x");
        assert_eq!(host.listing_count(), 2);
    }

    #[test]
    fn test_goto_home_bad_path_keeps_focus() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        manager.goto_home(&mut host, Some("/a")).unwrap();
        let other = host.open_listing("/x").unwrap();

        let result = manager.goto_home(&mut host, Some("/nope"));
        assert_eq!(result, Err(ReuseError::NotFound("/nope".to_string())));
        assert_eq!(host.current_listing().map(|l| l.id), Some(other.id));
    }

    #[test]
    fn test_goto_home_disabled() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default().with_magic(false));
        let result = manager.goto_home(&mut host, Some("/a"));
        assert_eq!(result, Err(ReuseError::PersistenceDisabled));
        assert_eq!(host.listing_count(), 0);
    }

    #[test]
    fn test_toggle_to_path_name() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        manager.goto_home(&mut host, Some("/x/y")).unwrap();

        let outcome = manager.toggle_naming(&mut host).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::PathDerived {
                name: "/x/y".to_string()
            }
        );
        assert!(host.lookup_listing("*dired*").is_none());
    }

    #[test]
    fn test_toggle_evicts_previous_holder() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        let home = match manager.goto_home(&mut host, Some("/a")).unwrap() {
            HomeOutcome::Opened(listing) => listing,
            other => panic!("unexpected outcome: {:?}", other),
        };
        let other = host.open_listing("/x").unwrap();

        let outcome = manager.toggle_naming(&mut host).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::Persistent {
                evicted: Some(home.id)
            }
        );
        assert_eq!(host.listing_count(), 1);
        assert_eq!(host.lookup_listing("*dired*").map(|l| l.id), Some(other.id));
    }

    #[test]
    fn test_toggle_disabled_releases_persistent_name() {
        let mut host = host();
        let listing = host.open_listing("/x/y").unwrap();
        host.rename_listing(listing.id, "*dired*").unwrap();
        let mut manager = PersistentViewManager::new(ReuseConfig::default().with_magic(false));

        let outcome = manager.toggle_naming(&mut host).unwrap();
        assert_eq!(
            outcome,
            ToggleOutcome::PathDerived {
                name: "/x/y".to_string()
            }
        );
        assert!(host.lookup_listing("*dired*").is_none());

        let result = manager.toggle_naming(&mut host);
        assert_eq!(result, Err(ReuseError::PersistenceDisabled));
        assert_eq!(host.listing(listing.id).unwrap().name, "/x/y");
    }

    #[test]
    fn test_toggle_outside_listing() {
        let mut host = host();
        let mut manager = PersistentViewManager::new(ReuseConfig::default());
        let result = manager.toggle_naming(&mut host);
        assert_eq!(result, Err(ReuseError::NotApplicable));
    }
}
