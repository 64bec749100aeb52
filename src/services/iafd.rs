//! IAFD performer database client.
//!
//! Implements [`PerformerDatabase`] against iafd.com's comprehensive
//! search. Result pages are plain HTML tables; extraction happens in sync
//! helpers so the parsed DOM never crosses an await point.

use crate::core::cast::{DbPerformer, PerformerDatabase};
use crate::core::normalize;
use crate::services::http::HtmlFetcher;
use crate::Result;
use scraper::{Html, Selector};

const IAFD_BASE: &str = "https://www.iafd.com";

/// Client for the IAFD performer database.
pub struct IafdClient<'a> {
    fetcher: &'a HtmlFetcher,
}

impl<'a> IafdClient<'a> {
    pub fn new(fetcher: &'a HtmlFetcher) -> Self {
        Self { fetcher }
    }

    fn search_url(kind: &str, term: &str) -> String {
        format!(
            "{IAFD_BASE}/results.asp?searchtype={kind}&searchstring={}",
            urlencoding::encode(term)
        )
    }
}

impl PerformerDatabase for IafdClient<'_> {
    async fn search_performers(&self, name: &str) -> Result<Vec<DbPerformer>> {
        let url = Self::search_url("comprehensive", name);
        let body = self.fetcher.fetch(&url).await?;
        Ok(extract_performers(&body))
    }

    async fn check_film(&self, studio: &str, title: &str) -> Result<bool> {
        let url = Self::search_url("title", title);
        let body = self.fetcher.fetch(&url).await?;
        Ok(film_listed(&body, studio, title))
    }
}

/// Pull performer rows out of a comprehensive-search result page. Both
/// the male and female result tables are walked.
fn extract_performers(body: &str) -> Vec<DbPerformer> {
    let document = Html::parse_document(body);
    let row_sel = match Selector::parse("table#tblMal tbody tr, table#tblFem tbody tr") {
        Ok(sel) => sel,
        Err(_) => return Vec::new(),
    };
    let link_sel = Selector::parse(r#"a[href*="perfid="]"#).ok();
    let img_sel = Selector::parse("img").ok();

    let mut performers = Vec::new();
    for row in document.select(&row_sel) {
        let Some(link) = link_sel.as_ref().and_then(|sel| row.select(sel).next()) else {
            continue;
        };
        let name = link.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }
        let photo = img_sel
            .as_ref()
            .and_then(|sel| row.select(sel).next())
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.contains("nophoto"))
            .map(absolute);
        performers.push(DbPerformer {
            name,
            photo,
            // roles are recorded on the performer detail page; the search
            // listing carries none
            role: None,
        });
    }
    performers
}

/// Whether a title-search page lists the film under the given studio.
fn film_listed(body: &str, studio: &str, title: &str) -> bool {
    let document = Html::parse_document(body);
    let row_sel = match Selector::parse("table#titleresult tbody tr") {
        Ok(sel) => sel,
        Err(_) => return false,
    };
    let cell_sel = match Selector::parse("td") {
        Ok(sel) => sel,
        Err(_) => return false,
    };

    let want_title = normalize::compare_title(title);
    let want_studio = normalize::compare_studio(studio);

    for row in document.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();
        let row_title = cells.first().map(|t| normalize::compare_title(t));
        let row_studio = cells.get(2).map(|s| normalize::compare_studio(s));
        if row_title.as_deref() == Some(want_title.as_str())
            && row_studio.as_deref() == Some(want_studio.as_str())
        {
            return true;
        }
    }
    false
}

fn absolute(src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else {
        format!("{IAFD_BASE}{src}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
          <table id="tblMal"><tbody>
            <tr>
              <td><img src="/graphics/headshots/john.jpg"></td>
              <td><a href="/person.rme/perfid=jdoe/John Doe.htm">John Doe</a></td>
            </tr>
            <tr>
              <td><img src="/graphics/nophoto.gif"></td>
              <td><a href="/person.rme/perfid=jroe/Jane Roe.htm">Jane Roe</a></td>
            </tr>
            <tr><td>row without a performer link</td></tr>
          </tbody></table>
        </body></html>"#;

    const TITLE_PAGE: &str = r#"
        <html><body>
          <table id="titleresult"><tbody>
            <tr><td>The Best of Zak</td><td>2020</td><td>StudioX.com</td></tr>
          </tbody></table>
        </body></html>"#;

    #[test]
    fn test_extract_performers() {
        let performers = extract_performers(RESULTS_PAGE);
        assert_eq!(performers.len(), 2);
        assert_eq!(performers[0].name, "John Doe");
        assert_eq!(
            performers[0].photo.as_deref(),
            Some("https://www.iafd.com/graphics/headshots/john.jpg")
        );
        // placeholder images do not count as headshots
        assert!(performers[1].photo.is_none());
    }

    #[test]
    fn test_film_listed() {
        assert!(film_listed(TITLE_PAGE, "StudioX", "Best of Zak, The"));
        assert!(!film_listed(TITLE_PAGE, "Other Studio", "Best of Zak, The"));
        assert!(!film_listed(TITLE_PAGE, "StudioX", "A Different Film"));
    }

    #[test]
    fn test_search_url_encoded() {
        let url = IafdClient::search_url("comprehensive", "john doe");
        assert_eq!(
            url,
            "https://www.iafd.com/results.asp?searchtype=comprehensive&searchstring=john%20doe"
        );
    }
}
