//! Pagination driver.
//!
//! Walks a site's search result pages sequentially, evaluating candidates
//! in result order until one is accepted, the page cap is reached, or no
//! further "next page" link exists. Page retrieval and markup knowledge
//! live behind [`SearchProvider`]; the driver only sees plain candidates.

use crate::core::matcher::CandidateMatcher;
use crate::core::query;
use crate::models::candidate::SearchPage;
use crate::models::config::MatchThresholds;
use crate::models::film::FilmInfo;
use crate::sites::SiteProfile;
use crate::Result;

/// External collaborator: fetches one search results page and extracts
/// its candidates and next-page link. Implementations own the HTTP layer,
/// inter-request delay and all site-specific markup. Listings with
/// missing required fields are dropped by the provider, never surfaced.
pub trait SearchProvider {
    fn fetch_page(&self, url: &str) -> impl std::future::Future<Output = Result<SearchPage>> + Send;
}

/// Sequential search driver for one site.
pub struct PaginationDriver<'a> {
    site: &'a SiteProfile,
    thresholds: &'a MatchThresholds,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(site: &'a SiteProfile, thresholds: &'a MatchThresholds) -> Self {
        Self { site, thresholds }
    }

    /// Run the search. On success the tuple carries the accepted
    /// candidate's URL (and compare date when the site listed one);
    /// exactly one candidate is ever accepted.
    ///
    /// A fetch failure on the initial query aborts the operation; a
    /// failure on a later page terminates the search as not-found, since
    /// earlier pages have already been evaluated.
    pub async fn search<P: SearchProvider>(&self, provider: &P, info: &mut FilmInfo) -> Result<()> {
        let matcher = CandidateMatcher::new(self.site, self.thresholds);
        let encoded = query::build_query(&info.search_title, self.site);
        let mut url = self.site.search_page_url(&encoded);
        let mut page_number: u32 = 1;

        loop {
            tracing::info!("Search query page {}: {}", page_number, url);
            let page = match provider.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) if page_number == 1 => {
                    tracing::warn!("Initial search query pulled no results: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Page {} fetch failed, stopping search: {}", page_number, e);
                    break;
                }
            };

            tracing::info!(
                "Result page {}: {} titles found",
                page_number,
                page.candidates.len()
            );
            for candidate in &page.candidates {
                match matcher.match_candidate(candidate, info) {
                    Ok(()) => {
                        tracing::info!(
                            "Matched '{}' at {}",
                            info.title,
                            info.site_url.as_deref().unwrap_or_default()
                        );
                        return Ok(());
                    }
                    Err(rejection) => {
                        tracing::debug!("Rejected candidate '{}': {}", candidate.title, rejection);
                    }
                }
            }

            match page.next_page {
                Some(next) if page_number < self.site.page_cap => {
                    url = self.site.absolute_url(&next);
                    page_number += 1;
                }
                Some(_) => {
                    tracing::info!("Page cap {} reached, stopping search", self.site.page_cap);
                    break;
                }
                None => {
                    tracing::info!("No more pages found");
                    break;
                }
            }
        }

        Err(crate::Error::NoMatchFound(info.title.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Candidate;
    use crate::sites;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DEFAULTS: MatchThresholds = MatchThresholds {
        title: 0.85,
        studio: 0.90,
        cast: 0.75,
    };

    fn film(studio: &str, title: &str) -> FilmInfo {
        FilmInfo {
            studio: studio.to_string(),
            title: title.to_string(),
            search_title: title.to_string(),
            compare_title: crate::core::normalize::compare_title(title),
            compare_studio: crate::core::normalize::compare_studio(studio),
            ..Default::default()
        }
    }

    fn listing(studio: &str, title: &str, url: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            studio: studio.to_string(),
            url: url.to_string(),
            release_date: None,
        }
    }

    /// Provider that serves a fixed sequence of pages, then repeats the
    /// last one forever (so a next-page loop never ends on its own).
    struct FixedPages {
        pages: Vec<SearchPage>,
        fetches: AtomicU32,
        fail_from_page: Option<u32>,
    }

    impl FixedPages {
        fn new(pages: Vec<SearchPage>) -> Self {
            Self {
                pages,
                fetches: AtomicU32::new(0),
                fail_from_page: None,
            }
        }
    }

    impl SearchProvider for FixedPages {
        async fn fetch_page(&self, _url: &str) -> Result<SearchPage> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(fail_from) = self.fail_from_page {
                if n + 1 >= fail_from {
                    return Err(crate::Error::FetchFailure {
                        url: _url.to_string(),
                        reason: "boom".to_string(),
                    });
                }
            }
            let idx = (n as usize).min(self.pages.len().saturating_sub(1));
            Ok(self.pages[idx].clone())
        }
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let provider = FixedPages::new(vec![SearchPage {
            candidates: vec![
                listing("Other", "Wrong Film", "/a"),
                listing("StudioX", "Right Film", "/b"),
                listing("StudioX", "Right Film", "/c"),
            ],
            next_page: None,
        }]);
        let mut info = film("StudioX", "Right Film");
        let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &DEFAULTS);
        driver.search(&provider, &mut info).await.unwrap();
        // first acceptable candidate, not the last
        assert_eq!(info.site_url.as_deref(), Some("http://www.gaydvdempire.com/b"));
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_match_on_second_page() {
        let provider = FixedPages::new(vec![
            SearchPage {
                candidates: vec![listing("StudioX", "Wrong Film", "/a")],
                next_page: Some("/page/2".to_string()),
            },
            SearchPage {
                candidates: vec![listing("StudioX", "Right Film", "/b")],
                next_page: None,
            },
        ]);
        let mut info = film("StudioX", "Right Film");
        let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &DEFAULTS);
        driver.search(&provider, &mut info).await.unwrap();
        assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_page_cap_halts_infinite_next_links() {
        // next_page always present: the driver must stop at the cap
        let provider = FixedPages::new(vec![SearchPage {
            candidates: vec![listing("Other", "Nothing Here", "/x")],
            next_page: Some("/page/next".to_string()),
        }]);
        let mut info = film("StudioX", "Never Found");
        let driver = PaginationDriver::new(&sites::FAGALICIOUS, &DEFAULTS);
        let err = driver.search(&provider, &mut info).await.unwrap_err();
        assert!(matches!(err, crate::Error::NoMatchFound(_)));
        assert_eq!(
            provider.fetches.load(Ordering::SeqCst),
            sites::FAGALICIOUS.page_cap
        );
        assert!(info.site_url.is_none());
    }

    #[tokio::test]
    async fn test_initial_fetch_failure_is_fatal() {
        let mut provider = FixedPages::new(vec![SearchPage::default()]);
        provider.fail_from_page = Some(1);
        let mut info = film("StudioX", "Film");
        let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &DEFAULTS);
        let err = driver.search(&provider, &mut info).await.unwrap_err();
        assert!(matches!(err, crate::Error::FetchFailure { .. }));
    }

    #[tokio::test]
    async fn test_later_fetch_failure_ends_as_not_found() {
        let mut provider = FixedPages::new(vec![SearchPage {
            candidates: vec![listing("Other", "Nothing", "/x")],
            next_page: Some("/page/2".to_string()),
        }]);
        provider.fail_from_page = Some(2);
        let mut info = film("StudioX", "Film");
        let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &DEFAULTS);
        let err = driver.search(&provider, &mut info).await.unwrap_err();
        assert!(matches!(err, crate::Error::NoMatchFound(_)));
    }

    #[tokio::test]
    async fn test_exhausted_pages_end_as_not_found() {
        let provider = FixedPages::new(vec![SearchPage {
            candidates: vec![],
            next_page: None,
        }]);
        let mut info = film("StudioX", "Film");
        let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &DEFAULTS);
        let err = driver.search(&provider, &mut info).await.unwrap_err();
        assert!(matches!(err, crate::Error::NoMatchFound(_)));
    }
}
