//! Integration tests for the full matching pipeline.
//!
//! Tests cover:
//! - Filename parsing through candidate acceptance on a mock provider
//! - Match result artifact round-trip between search and update
//! - Sort-order titles, fuzzy studios and release date confirmation

use chrono::NaiveDate;
use film_agent::core::pagination::{PaginationDriver, SearchProvider};
use film_agent::core::parser::FilenameParser;
use film_agent::models::candidate::{Candidate, SearchPage};
use film_agent::models::config::Config;
use film_agent::models::film::FilmInfo;
use film_agent::sites;
use film_agent::Result;

/// Provider serving a fixed page sequence.
struct Pages(Vec<SearchPage>);

impl SearchProvider for Pages {
    async fn fetch_page(&self, url: &str) -> Result<SearchPage> {
        // page URLs produced by the driver are /page/N or the initial query
        let idx = url
            .rsplit('/')
            .next()
            .and_then(|n| n.parse::<usize>().ok())
            .map(|n| n - 1)
            .unwrap_or(0);
        Ok(self.0[idx.min(self.0.len() - 1)].clone())
    }
}

fn listing(studio: &str, title: &str, date: Option<&str>) -> Candidate {
    Candidate {
        title: title.to_string(),
        studio: studio.to_string(),
        url: "/film/42".to_string(),
        release_date: date.map(str::to_string),
    }
}

// ========== END-TO-END MATCHING ==========

#[tokio::test]
async fn test_filename_to_confirmed_match() {
    let config = Config::default();
    let parser = FilenameParser::from_config(&config).unwrap();
    let mut info = parser.parse("StudioX - Best Of Zak, The (2020)").unwrap();

    // catalog lists the title in sort order, the studio with a domain
    // suffix, and a full release date inside the year window
    let provider = Pages(vec![SearchPage {
        candidates: vec![
            listing("Other Films", "Best Of Zak, The", Some("01/15/2020")),
            listing("StudioX.com", "The Best of Zak", Some("01/15/2020")),
        ],
        next_page: None,
    }]);

    let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &config.thresholds);
    driver.search(&provider, &mut info).await.unwrap();

    assert_eq!(
        info.site_url.as_deref(),
        Some("http://www.gaydvdempire.com/film/42")
    );
    assert_eq!(info.compare_date, NaiveDate::from_ymd_opt(2020, 1, 15));
    // the filename fields stay authoritative
    assert_eq!(info.studio, "StudioX");
    assert_eq!(info.title, "Best Of Zak, The");
}

#[tokio::test]
async fn test_series_filename_searches_by_episode_title() {
    let config = Config::default();
    let parser = FilenameParser::from_config(&config).unwrap();
    let mut info = parser
        .parse("StudioX - Heat Wave 3 - Summer Nights (2021)")
        .unwrap();

    assert_eq!(info.search_title, "Summer Nights");

    let provider = Pages(vec![SearchPage {
        candidates: vec![listing("StudioX", "Heat Wave 3 - Summer Nights", None)],
        next_page: None,
    }]);
    let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &config.thresholds);
    driver.search(&provider, &mut info).await.unwrap();
    assert!(info.site_url.is_some());
}

#[tokio::test]
async fn test_wrong_year_never_matches() {
    let config = Config::default();
    let parser = FilenameParser::from_config(&config).unwrap();
    let mut info = parser.parse("StudioX - Film Night (2020)").unwrap();

    let provider = Pages(vec![SearchPage {
        candidates: vec![listing("StudioX", "Film Night", Some("06/01/2015"))],
        next_page: None,
    }]);
    let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &config.thresholds);
    let err = driver.search(&provider, &mut info).await.unwrap_err();
    assert!(matches!(err, film_agent::Error::NoMatchFound(_)));
    assert!(info.site_url.is_none());
}

// ========== MATCH RESULT ARTIFACT ==========

#[tokio::test]
async fn test_artifact_round_trip_between_search_and_update() {
    let config = Config::default();
    let parser = FilenameParser::from_config(&config).unwrap();
    let mut info = parser.parse("StudioX - Best Of Zak, The (2020)").unwrap();

    let provider = Pages(vec![SearchPage {
        candidates: vec![listing("StudioX.com", "The Best of Zak", Some("01/15/2020"))],
        next_page: None,
    }]);
    let driver = PaginationDriver::new(&sites::GAY_DVD_EMPIRE, &config.thresholds);
    driver.search(&provider, &mut info).await.unwrap();

    let json = info.to_match_result().unwrap();
    let back = FilmInfo::from_match_result(&json).unwrap();
    assert_eq!(back.site_url, info.site_url);
    assert_eq!(back.compare_date, info.compare_date);
    assert_eq!(back.collections, info.collections);
}

#[test]
fn test_unmatched_artifact_rejected_by_update() {
    let info = FilmInfo {
        studio: "StudioX".to_string(),
        title: "Never Matched".to_string(),
        ..Default::default()
    };
    let json = info.to_match_result().unwrap();
    assert!(FilmInfo::from_match_result(&json).is_err());
}
