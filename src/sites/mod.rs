//! Per-site profiles.
//!
//! The matching engine is one shared implementation; everything that
//! actually differs between catalog sites lives here: search URL template,
//! query character sets and length cap, date format, pagination cap, and
//! whether the site displays titles in library sort order.

use crate::Result;

/// Static description of one catalog site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Short identifier used on the command line.
    pub name: &'static str,
    /// Site root, prepended to relative detail-page links.
    pub base_url: &'static str,
    /// Search URL template; `{}` is replaced with the encoded query.
    pub search_url: &'static str,
    /// chrono format string for the site's release dates.
    pub date_format: &'static str,
    /// Maximum number of result pages to walk before giving up.
    pub page_cap: u32,
    /// Maximum encoded query length accepted by the site's search engine.
    pub max_query_len: usize,
    /// Characters removed outright when building the search query.
    pub query_null_chars: &'static [char],
    /// Characters replaced with a space when building the search query.
    pub query_space_chars: &'static [char],
    /// Truncate the query at the first embedded quote character; some
    /// search engines 404 on them.
    pub truncate_at_quote: bool,
    /// Site displays titles in sort order ("Best of Zak, The").
    pub titles_in_sort_order: bool,
    /// Scene sites prefix the studio to the entry title ("Studio: Title");
    /// the studio name must be stripped from the compare title.
    pub strip_studio_from_title: bool,
}

const COMMON_SPACE_CHARS: &[char] = &[',', '-', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}'];

/// DVD catalog with list view search and sort-order titles.
pub const GAY_DVD_EMPIRE: SiteProfile = SiteProfile {
    name: "gaydvdempire",
    base_url: "http://www.gaydvdempire.com",
    search_url: "http://www.gaydvdempire.com/AllSearch/Search?view=list&exactMatch={}&q={}",
    date_format: "%m/%d/%Y",
    page_cap: 10,
    max_query_len: 50,
    query_null_chars: &[],
    query_space_chars: COMMON_SPACE_CHARS,
    truncate_at_quote: false,
    titles_in_sort_order: true,
    strip_studio_from_title: false,
};

/// Streaming catalog; search engine rejects most punctuation outright.
pub const GAY_HOT_MOVIES: SiteProfile = SiteProfile {
    name: "gayhotmovies",
    base_url: "https://www.gayhotmovies.com",
    search_url: "https://www.gayhotmovies.com/search.php?num_per_page=48&&page_sort=relevance&search_string={}&find_with=all&searchtype_value=video_title",
    date_format: "%b %d, %Y",
    page_cap: 10,
    max_query_len: 50,
    query_null_chars: &['\'', ',', '&', '!', '.', '#'],
    query_space_chars: &['-', '\u{2013}', '\u{2014}', '(', ')'],
    truncate_at_quote: false,
    titles_in_sort_order: false,
    strip_studio_from_title: false,
};

/// Scene blog; entries read "Studio: Title", search breaks on embedded
/// quotes and caps the query at 48 characters.
pub const FAGALICIOUS: SiteProfile = SiteProfile {
    name: "fagalicious",
    base_url: "https://fagalicious.com",
    search_url: "https://fagalicious.com/search/{}",
    date_format: "%B %d, %Y",
    page_cap: 5,
    max_query_len: 48,
    query_null_chars: &[],
    query_space_chars: COMMON_SPACE_CHARS,
    truncate_at_quote: true,
    titles_in_sort_order: false,
    strip_studio_from_title: true,
};

/// Scene blog with two-digit-year dates.
pub const QUEER_CLICK: SiteProfile = SiteProfile {
    name: "queerclick",
    base_url: "https://www.queerclick.com",
    search_url: "https://www.queerclick.com/?s={}",
    date_format: "%d %b %y",
    page_cap: 10,
    max_query_len: 50,
    query_null_chars: &[],
    query_space_chars: COMMON_SPACE_CHARS,
    truncate_at_quote: false,
    titles_in_sort_order: false,
    strip_studio_from_title: true,
};

/// All configured site profiles.
pub const ALL_SITES: &[&SiteProfile] = &[&GAY_DVD_EMPIRE, &GAY_HOT_MOVIES, &FAGALICIOUS, &QUEER_CLICK];

/// Look up a profile by its command-line name.
pub fn find_site(name: &str) -> Result<&'static SiteProfile> {
    ALL_SITES
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| crate::Error::UnknownSite(name.to_string()))
}

impl SiteProfile {
    /// Build the first search page URL from an encoded query.
    pub fn search_page_url(&self, encoded_query: &str) -> String {
        self.search_url.replace("{}", encoded_query)
    }

    /// Absolutize a possibly-relative detail link.
    pub fn absolute_url(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}{}", self.base_url, link)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_site() {
        assert_eq!(find_site("fagalicious").unwrap().page_cap, 5);
        assert_eq!(find_site("GayDVDEmpire").unwrap().name, "gaydvdempire");
        assert!(find_site("nosuchsite").is_err());
    }

    #[test]
    fn test_search_page_url_substitutes_all_slots() {
        let url = GAY_DVD_EMPIRE.search_page_url("big%20title");
        assert!(!url.contains("{}"));
        assert_eq!(url.matches("big%20title").count(), 2);
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            FAGALICIOUS.absolute_url("/tag/film"),
            "https://fagalicious.com/tag/film"
        );
        assert_eq!(
            FAGALICIOUS.absolute_url("https://elsewhere.com/x"),
            "https://elsewhere.com/x"
        );
    }
}
