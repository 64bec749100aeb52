//! Search result candidates produced by the scraping collaborator.

use serde::{Deserialize, Serialize};

/// One listing scraped from a site's search results page.
///
/// The scraping collaborator owns all markup knowledge; by the time a
/// candidate reaches the matcher it is plain data. Listings whose required
/// fields could not be extracted are dropped by the provider and never
/// reach the matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Title as displayed by the site (possibly in library sort order).
    pub title: String,
    /// Studio name as displayed by the site.
    pub studio: String,
    /// Detail-page URL for this listing.
    pub url: String,
    /// Raw release-date string, when the listing shows one. Format is
    /// site-specific; the matcher parses it with the site profile's format.
    pub release_date: Option<String>,
}

/// One page of search results plus the link to the next page, if any.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Candidates extracted from this page, in result order.
    pub candidates: Vec<Candidate>,
    /// Absolute URL of the next results page.
    pub next_page: Option<String>,
}
