//! Search page scraping collaborator.
//!
//! Implements [`SearchProvider`] for the engine: fetches one results page
//! and extracts plain [`Candidate`] values with CSS selectors. All markup
//! knowledge stays here; listings with missing required fields are
//! dropped (logged, non-fatal) so the matcher only ever sees complete
//! candidates.

use crate::core::pagination::SearchProvider;
use crate::models::candidate::{Candidate, SearchPage};
use crate::services::http::HtmlFetcher;
use crate::sites::SiteProfile;
use crate::Result;
use scraper::{Html, Selector};

/// CSS selectors for one site's results page.
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    /// One search result listing.
    pub entry: &'static str,
    /// Title element within a listing.
    pub title: &'static str,
    /// Element whose `href` is the detail-page link.
    pub link: &'static str,
    /// Studio element within a listing; `None` for scene sites that
    /// prefix the studio to the entry title as "Studio: Title".
    pub studio: Option<&'static str>,
    /// Release-date element within a listing.
    pub date: Option<&'static str>,
    /// Next-page link on the page.
    pub next: &'static str,
}

/// Selector-driven search provider.
pub struct SelectorSearchProvider<'a> {
    fetcher: &'a HtmlFetcher,
    site: &'a SiteProfile,
    selectors: SiteSelectors,
}

impl<'a> SelectorSearchProvider<'a> {
    pub fn new(fetcher: &'a HtmlFetcher, site: &'a SiteProfile, selectors: SiteSelectors) -> Self {
        Self {
            fetcher,
            site,
            selectors,
        }
    }
}

impl SearchProvider for SelectorSearchProvider<'_> {
    async fn fetch_page(&self, url: &str) -> Result<SearchPage> {
        let body = self.fetcher.fetch(url).await?;
        Ok(extract_page(&body, self.site, &self.selectors))
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Extract candidates and the next-page link from a results page body.
/// Sync on purpose: the parsed DOM never crosses an await point.
fn extract_page(body: &str, site: &SiteProfile, selectors: &SiteSelectors) -> SearchPage {
    let document = Html::parse_document(body);
    let mut page = SearchPage::default();

    let Some(entry_sel) = parse_selector(selectors.entry) else {
        return page;
    };
    let title_sel = parse_selector(selectors.title);
    let link_sel = parse_selector(selectors.link);
    let studio_sel = selectors.studio.and_then(parse_selector);
    let date_sel = selectors.date.and_then(parse_selector);

    for entry in document.select(&entry_sel) {
        let title_text = title_sel
            .as_ref()
            .and_then(|sel| entry.select(sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());
        let link = link_sel
            .as_ref()
            .and_then(|sel| entry.select(sel).next())
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string);

        let (Some(raw_title), Some(url)) = (title_text, link) else {
            tracing::debug!("Skipping listing with missing title or link");
            continue;
        };

        // scene sites run the studio into the title: "Studio: Title"
        let (studio, title) = match &studio_sel {
            Some(sel) => {
                let studio = entry
                    .select(sel)
                    .next()
                    .map(|el| el.text().collect::<String>().trim().to_string());
                match studio.filter(|s| !s.is_empty()) {
                    Some(studio) => (studio, raw_title),
                    None => {
                        tracing::debug!("Skipping listing '{}' with missing studio", raw_title);
                        continue;
                    }
                }
            }
            None => match split_site_entry(&raw_title) {
                Some(pair) => pair,
                None => {
                    tracing::debug!("Skipping unsplittable entry '{}'", raw_title);
                    continue;
                }
            },
        };

        let release_date = date_sel
            .as_ref()
            .and_then(|sel| entry.select(sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|d| !d.is_empty());

        page.candidates.push(Candidate {
            title,
            studio,
            url: site.absolute_url(&url),
            release_date,
        });
    }

    page.next_page = parse_selector(selectors.next)
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(str::to_string)
        })
        .map(|href| site.absolute_url(&href));

    page
}

/// Split a scene-site entry title into (studio, title). The usual form is
/// "Studio: Title"; very old entries read "Title at Studio" / "Title on
/// Studio".
fn split_site_entry(entry: &str) -> Option<(String, String)> {
    if let Some((studio, title)) = entry.split_once(':') {
        let studio = studio.trim();
        let title = title.trim();
        if !studio.is_empty() && !title.is_empty() {
            return Some((studio.to_string(), title.to_string()));
        }
    }
    let words: Vec<&str> = entry.split_whitespace().collect();
    if words.len() >= 3 {
        let connector = words[words.len() - 2].to_lowercase();
        if connector == "at" || connector == "on" {
            let studio = words[words.len() - 1].to_string();
            let title = words[..words.len() - 2].join(" ");
            return Some((studio, title));
        }
    }
    None
}

/// Selectors for the configured sites.
pub fn selectors_for(site: &SiteProfile) -> SiteSelectors {
    match site.name {
        "gaydvdempire" => SiteSelectors {
            entry: "div.row.list-view-item",
            title: r#"h3 a[label="Title"]"#,
            link: r#"h3 a[label="Title"]"#,
            studio: Some("ul li a.studio"),
            date: Some("small.release-date"),
            next: r#"a[title="Next"]"#,
        },
        "gayhotmovies" => SiteSelectors {
            entry: "div.cell.movie_box",
            title: "h3.title a",
            link: "h3.title a",
            studio: Some("span.studio a"),
            date: Some("span.release_year a"),
            next: r#"a[title="Next Page"]"#,
        },
        "fagalicious" => SiteSelectors {
            entry: "header.entry-header",
            title: "h2 a",
            link: "h2 a",
            studio: None,
            date: Some("li.meta-date a"),
            next: "a.next.page-numbers",
        },
        _ => SiteSelectors {
            entry: "article[id]",
            title: "h2.entry-title a",
            link: "h2.entry-title a",
            studio: None,
            date: Some("span.date.updated"),
            next: "div.pagination span.right a",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites;

    const SCENE_PAGE: &str = r#"
        <html><body>
          <header class="entry-header">
            <h2><a href="/scenes/morning-run">Hot Studio: Morning Run</a></h2>
            <ul><li class="meta-date"><a>January 15, 2020</a></li></ul>
          </header>
          <header class="entry-header">
            <h2><a href="/scenes/broken">No Colon Entry Here</a></h2>
          </header>
          <a class="next page-numbers" href="/search/morning/page/2">Next</a>
        </body></html>"#;

    #[test]
    fn test_extract_scene_page() {
        let selectors = selectors_for(&sites::FAGALICIOUS);
        let page = extract_page(SCENE_PAGE, &sites::FAGALICIOUS, &selectors);

        // the unsplittable entry is skipped, not fatal
        assert_eq!(page.candidates.len(), 1);
        let c = &page.candidates[0];
        assert_eq!(c.studio, "Hot Studio");
        assert_eq!(c.title, "Morning Run");
        assert_eq!(c.url, "https://fagalicious.com/scenes/morning-run");
        assert_eq!(c.release_date.as_deref(), Some("January 15, 2020"));
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://fagalicious.com/search/morning/page/2")
        );
    }

    #[test]
    fn test_split_site_entry() {
        assert_eq!(
            split_site_entry("Studio: The Title"),
            Some(("Studio".to_string(), "The Title".to_string()))
        );
        assert_eq!(
            split_site_entry("Great Scene at StudioX"),
            Some(("StudioX".to_string(), "Great Scene".to_string()))
        );
        assert_eq!(split_site_entry("No Marker Entry"), None);
    }

    #[test]
    fn test_extract_empty_page() {
        let selectors = selectors_for(&sites::FAGALICIOUS);
        let page = extract_page("<html><body></body></html>", &sites::FAGALICIOUS, &selectors);
        assert!(page.candidates.is_empty());
        assert!(page.next_page.is_none());
    }
}
