//! Path-derived listing names

use listing_names::uniquify;
use services_listing_host::ListingHost;

/// Computes the canonical path-derived name of a listing
pub struct NamePolicy;

impl NamePolicy {
    /// Returns the display name for `directory`, unique among open listings
    ///
    /// `owner` is the name the listing being renamed holds right now; it does
    /// not count as a collision.
    pub fn compute_name(host: &dyn ListingHost, directory: &str, owner: Option<&str>) -> String {
        let base = host.abbreviate_and_normalize(directory);
        let taken = host.listing_names();
        uniquify(&base, |candidate| {
            Some(candidate) != owner && taken.iter().any(|name| name == candidate)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services_listing_host::SimListingHost;

    #[test]
    fn test_compute_name_abbreviates() {
        let host = SimListingHost::new().with_home("/home/ana");
        assert_eq!(
            NamePolicy::compute_name(&host, "/home/ana/src/", None),
            "~/src"
        );
    }

    #[test]
    fn test_compute_name_uniquifies_against_others() {
        let mut host = SimListingHost::new();
        host.add_directory("/srv/a");
        host.open_listing("/srv/a").unwrap();
        assert_eq!(NamePolicy::compute_name(&host, "/srv/a", None), "/srv/a<2>");
    }

    #[test]
    fn test_compute_name_ignores_owner() {
        let mut host = SimListingHost::new();
        host.add_directory("/srv/a");
        let listing = host.open_listing("/srv/a").unwrap();
        assert_eq!(
            NamePolicy::compute_name(&host, "/srv/a", Some(listing.name.as_str())),
            "/srv/a"
        );
    }
}
