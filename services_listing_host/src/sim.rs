//! Simulated listing host
//!
//! A deterministic, in-memory [`ListingHost`] for tests and the console.
//! Directories and files are plain path entries; listings live in a table
//! ordered by creation.

use crate::{HostError, ListingHost};
use listing_names::{display_name, uniquify, ListingPaths};
use listing_types::{EntryKind, FocusedEntry, Listing, ListingId, PromptResponse};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Listing record - internal state for an open listing
#[derive(Debug, Clone)]
struct ListingRecord {
    id: ListingId,
    name: String,
    directory: String,
    /// Entry under the focus line
    point: Option<String>,
}

impl ListingRecord {
    fn snapshot(&self) -> Listing {
        Listing::new(self.id, self.name.clone(), self.directory.clone())
    }
}

/// Simulated listing host
///
/// Emulates the behavior the reuse core relies on: repointing a listing
/// renames it after its new directory, new listings get uniquified
/// path-derived names, and the name table refuses duplicates.
#[derive(Debug, Clone)]
pub struct SimListingHost {
    /// Known paths and their kinds
    nodes: BTreeMap<String, EntryKind>,
    /// Paths (and everything below them) that cannot be read
    denied: BTreeSet<String>,
    /// Home directory used for abbreviation
    home: Option<String>,
    /// Open listings in creation order
    listings: Vec<ListingRecord>,
    /// Focused listing (None when a file surface has focus)
    current: Option<ListingId>,
    /// Files opened in separate surfaces
    file_surfaces: Vec<String>,
    /// Queued answers for directory prompts
    prompt_answers: VecDeque<PromptResponse>,
    /// Labels of prompts shown so far
    prompt_log: Vec<String>,
}

impl SimListingHost {
    /// Creates a host with only the root directory
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), EntryKind::Directory);
        Self {
            nodes,
            denied: BTreeSet::new(),
            home: None,
            listings: Vec::new(),
            current: None,
            file_surfaces: Vec::new(),
            prompt_answers: VecDeque::new(),
            prompt_log: Vec::new(),
        }
    }

    /// Sets the home directory used for name abbreviation
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        let home = home.into();
        self.add_directory(&home);
        self.home = ListingPaths::normalize(&home).ok();
        self
    }

    /// Adds a directory and all of its ancestors
    pub fn add_directory(&mut self, path: &str) {
        if let Ok(path) = ListingPaths::normalize(path) {
            self.add_ancestors(&path);
            self.nodes.insert(path, EntryKind::Directory);
        }
    }

    /// Adds a file, creating its ancestor directories
    pub fn add_file(&mut self, path: &str) {
        if let Ok(path) = ListingPaths::normalize(path) {
            self.add_ancestors(&path);
            self.nodes.insert(path, EntryKind::File);
        }
    }

    /// Makes a path and everything below it unreadable
    pub fn deny(&mut self, path: &str) {
        if let Ok(path) = ListingPaths::normalize(path) {
            self.denied.insert(path);
        }
    }

    /// Queues an answer for the next directory prompt
    pub fn queue_prompt_answer(&mut self, answer: PromptResponse) {
        self.prompt_answers.push_back(answer);
    }

    /// Labels of all prompts shown so far
    pub fn prompt_log(&self) -> &[String] {
        &self.prompt_log
    }

    /// Snapshots of all open listings, oldest first
    pub fn listings(&self) -> Vec<Listing> {
        self.listings.iter().map(ListingRecord::snapshot).collect()
    }

    /// Number of open listings
    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }

    /// Files opened in separate surfaces
    pub fn file_surfaces(&self) -> &[String] {
        &self.file_surfaces
    }

    fn add_ancestors(&mut self, path: &str) {
        let mut parent = ListingPaths::parent(path);
        while let Some(dir) = parent {
            parent = ListingPaths::parent(&dir);
            self.nodes.insert(dir, EntryKind::Directory);
        }
    }

    fn is_denied(&self, path: &str) -> bool {
        self.denied.iter().any(|denied| {
            denied == "/" || path == denied || path.starts_with(&format!("{}/", denied))
        })
    }

    fn record(&self, id: ListingId) -> Option<&ListingRecord> {
        self.listings.iter().find(|record| record.id == id)
    }

    fn record_mut(&mut self, id: ListingId) -> Result<&mut ListingRecord, HostError> {
        self.listings
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(HostError::ListingNotFound(id))
    }

    /// Normalizes and classifies a path
    fn stat(&self, path: &str) -> Result<(String, EntryKind), HostError> {
        let normalized =
            ListingPaths::normalize(path).map_err(|_| HostError::NotFound(path.to_string()))?;
        let kind = *self
            .nodes
            .get(&normalized)
            .ok_or_else(|| HostError::NotFound(normalized.clone()))?;
        if self.is_denied(&normalized) {
            return Err(HostError::NotAccessible(normalized));
        }
        Ok((normalized, kind))
    }

    fn check_directory(&self, path: &str) -> Result<String, HostError> {
        match self.stat(path)? {
            (directory, EntryKind::Directory) => Ok(directory),
            (file, EntryKind::File) => Err(HostError::NotADirectory(file)),
        }
    }

    /// Path-derived name for `directory`, unique among other listings
    fn derived_name(&self, directory: &str, owner: Option<ListingId>) -> String {
        let base = self.abbreviate_and_normalize(directory);
        uniquify(&base, |candidate| {
            self.listings
                .iter()
                .any(|record| Some(record.id) != owner && record.name == candidate)
        })
    }
}

impl Default for SimListingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingHost for SimListingHost {
    fn lookup_listing(&self, name: &str) -> Option<Listing> {
        self.listings
            .iter()
            .find(|record| record.name == name)
            .map(ListingRecord::snapshot)
    }

    fn listing(&self, id: ListingId) -> Option<Listing> {
        self.record(id).map(ListingRecord::snapshot)
    }

    fn current_listing(&self) -> Option<Listing> {
        self.current
            .and_then(|id| self.record(id))
            .map(ListingRecord::snapshot)
    }

    fn focused_entry(&self, id: ListingId) -> Option<FocusedEntry> {
        let point = self.record(id)?.point.as_ref()?;
        let kind = self.nodes.get(point)?;
        Some(FocusedEntry {
            kind: *kind,
            path: point.clone(),
        })
    }

    fn focus_entry(&mut self, id: ListingId, path: &str) -> Result<bool, HostError> {
        let directory = self
            .record(id)
            .map(|record| record.directory.clone())
            .ok_or(HostError::ListingNotFound(id))?;

        let Ok(target) = ListingPaths::resolve(&directory, path) else {
            return Ok(false);
        };
        let shown = ListingPaths::parent(&target).as_deref() == Some(directory.as_str());
        if !shown || !self.nodes.contains_key(&target) {
            return Ok(false);
        }

        self.record_mut(id)?.point = Some(target);
        Ok(true)
    }

    fn entry_kind(&self, path: &str) -> Result<EntryKind, HostError> {
        self.stat(path).map(|(_, kind)| kind)
    }

    fn replace_contents(&mut self, id: ListingId, path: &str) -> Result<(), HostError> {
        let directory = self.check_directory(path)?;
        if self.record(id).is_none() {
            return Err(HostError::ListingNotFound(id));
        }

        let name = self.derived_name(&directory, Some(id));
        let record = self.record_mut(id)?;
        record.directory = directory;
        record.name = name;
        record.point = None;
        Ok(())
    }

    fn open_listing(&mut self, path: &str) -> Result<Listing, HostError> {
        let directory = self.check_directory(path)?;
        let record = ListingRecord {
            id: ListingId::new(),
            name: self.derived_name(&directory, None),
            directory,
            point: None,
        };
        let listing = record.snapshot();

        self.current = Some(record.id);
        self.listings.push(record);
        Ok(listing)
    }

    fn open_file(&mut self, path: &str) -> Result<(), HostError> {
        let (file, _) = self.stat(path)?;
        self.file_surfaces.push(file);
        self.current = None;
        Ok(())
    }

    fn focus_listing(&mut self, id: ListingId) -> Result<(), HostError> {
        if self.record(id).is_none() {
            return Err(HostError::ListingNotFound(id));
        }
        self.current = Some(id);
        Ok(())
    }

    fn rename_listing(&mut self, id: ListingId, name: &str) -> Result<(), HostError> {
        if self
            .listings
            .iter()
            .any(|record| record.id != id && record.name == name)
        {
            return Err(HostError::NameInUse(name.to_string()));
        }
        self.record_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn destroy_listing(&mut self, id: ListingId) -> Result<(), HostError> {
        let pos = self
            .listings
            .iter()
            .position(|record| record.id == id)
            .ok_or(HostError::ListingNotFound(id))?;
        self.listings.remove(pos);

        if self.current == Some(id) {
            self.current = self.listings.last().map(|record| record.id);
        }
        Ok(())
    }

    fn listing_names(&self) -> Vec<String> {
        self.listings.iter().map(|record| record.name.clone()).collect()
    }

    fn prompt_for_directory(&mut self, label: &str, _default_dir: &str) -> PromptResponse {
        self.prompt_log.push(label.to_string());
        self.prompt_answers
            .pop_front()
            .unwrap_or(PromptResponse::Cancelled)
    }

    fn abbreviate_and_normalize(&self, path: &str) -> String {
        display_name(path, self.home.as_deref())
    }

    fn default_directory(&self) -> String {
        self.home.clone().unwrap_or_else(|| "/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_host() -> SimListingHost {
        let mut host = SimListingHost::new().with_home("/home/ana");
        host.add_directory("/home/ana/src");
        host.add_file("/home/ana/src/main.rs");
        host.add_directory("/srv/a/tmp");
        host.add_directory("/srv/b/tmp");
        host
    }

    #[test]
    fn test_add_file_creates_ancestors() {
        let host = sample_host();
        assert_eq!(host.entry_kind("/home"), Ok(EntryKind::Directory));
        assert_eq!(host.entry_kind("/home/ana/src/main.rs"), Ok(EntryKind::File));
    }

    #[test]
    fn test_entry_kind_missing() {
        let host = sample_host();
        assert_eq!(
            host.entry_kind("/nope"),
            Err(HostError::NotFound("/nope".to_string()))
        );
    }

    #[test]
    fn test_denied_subtree() {
        let mut host = sample_host();
        host.deny("/srv/a");
        assert_eq!(
            host.entry_kind("/srv/a/tmp"),
            Err(HostError::NotAccessible("/srv/a/tmp".to_string()))
        );
        assert_eq!(host.entry_kind("/srv/b/tmp"), Ok(EntryKind::Directory));
    }

    #[test]
    fn test_open_listing_abbreviates_name() {
        let mut host = sample_host();
        let listing = host.open_listing("/home/ana/src/").unwrap();
        assert_eq!(listing.name, "~/src");
        assert_eq!(listing.directory, "/home/ana/src");
        assert_eq!(host.current_listing(), Some(listing));
    }

    #[test]
    fn test_open_listing_uniquifies() {
        let mut host = sample_host();
        let first = host.open_listing("/srv/a").unwrap();
        let second = host.open_listing("/srv/a").unwrap();
        assert_eq!(first.name, "/srv/a");
        assert_eq!(second.name, "/srv/a<2>");
    }

    #[test]
    fn test_open_listing_on_file() {
        let mut host = sample_host();
        let result = host.open_listing("/home/ana/src/main.rs");
        assert_eq!(
            result,
            Err(HostError::NotADirectory("/home/ana/src/main.rs".to_string()))
        );
        assert_eq!(host.listing_count(), 0);
    }

    #[test]
    fn test_replace_contents_keeps_identity() {
        let mut host = sample_host();
        let listing = host.open_listing("/srv/a").unwrap();
        host.replace_contents(listing.id, "/srv/b").unwrap();

        let after = host.listing(listing.id).unwrap();
        assert_eq!(after.directory, "/srv/b");
        assert_eq!(after.name, "/srv/b");
        assert_eq!(host.listing_count(), 1);
    }

    #[test]
    fn test_replace_contents_missing_directory() {
        let mut host = sample_host();
        let listing = host.open_listing("/srv/a").unwrap();
        let result = host.replace_contents(listing.id, "/srv/c");
        assert_eq!(result, Err(HostError::NotFound("/srv/c".to_string())));
        assert_eq!(host.listing(listing.id).unwrap().directory, "/srv/a");
    }

    #[test]
    fn test_rename_refuses_duplicates() {
        let mut host = sample_host();
        let a = host.open_listing("/srv/a").unwrap();
        let b = host.open_listing("/srv/b").unwrap();
        host.rename_listing(a.id, "*dired*").unwrap();

        let result = host.rename_listing(b.id, "*dired*");
        assert_eq!(result, Err(HostError::NameInUse("*dired*".to_string())));
        // Renaming to the name already held is fine
        assert!(host.rename_listing(a.id, "*dired*").is_ok());
    }

    #[test]
    fn test_destroy_moves_focus() {
        let mut host = sample_host();
        let a = host.open_listing("/srv/a").unwrap();
        let b = host.open_listing("/srv/b").unwrap();
        host.destroy_listing(b.id).unwrap();
        assert_eq!(host.current_listing().map(|l| l.id), Some(a.id));
        assert_eq!(
            host.destroy_listing(b.id),
            Err(HostError::ListingNotFound(b.id))
        );
    }

    #[test]
    fn test_focus_entry_and_focused_entry() {
        let mut host = sample_host();
        let listing = host.open_listing("/home/ana/src").unwrap();
        assert_eq!(host.focused_entry(listing.id), None);

        assert_eq!(host.focus_entry(listing.id, "main.rs"), Ok(true));
        assert_eq!(
            host.focused_entry(listing.id),
            Some(FocusedEntry::file("/home/ana/src/main.rs"))
        );

        // Entries outside the listing are not shown
        assert_eq!(host.focus_entry(listing.id, "/srv/a"), Ok(false));
        assert_eq!(host.focus_entry(listing.id, "missing"), Ok(false));
    }

    #[test]
    fn test_open_file_moves_focus() {
        let mut host = sample_host();
        host.open_listing("/home/ana/src").unwrap();
        host.open_file("/home/ana/src/main.rs").unwrap();
        assert_eq!(host.file_surfaces(), ["/home/ana/src/main.rs".to_string()]);
        assert!(host.current_listing().is_none());
    }

    #[test]
    fn test_prompt_answers() {
        let mut host = sample_host();
        host.queue_prompt_answer(PromptResponse::Path("/srv".to_string()));
        assert_eq!(
            host.prompt_for_directory("Dired (directory): ", "/"),
            PromptResponse::Path("/srv".to_string())
        );
        assert_eq!(
            host.prompt_for_directory("Dired (directory): ", "/"),
            PromptResponse::Cancelled
        );
        assert_eq!(host.prompt_log().len(), 2);
    }
}
