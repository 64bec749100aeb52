//! Candidate matcher.
//!
//! Decides whether one scraped search result is the film the filename
//! describes. Studio and title must pass; the release date is an advisory
//! signal that, when present, must sit inside the year window and then
//! pins the confirmed `compare_date` on the tuple.

use crate::core::normalize;
use crate::models::candidate::Candidate;
use crate::models::config::MatchThresholds;
use crate::models::film::FilmInfo;
use crate::sites::SiteProfile;
use chrono::{Datelike, NaiveDate};
use strsim::normalized_levenshtein;
use thiserror::Error;

/// Non-fatal rejection of a single candidate. The pagination driver logs
/// these and moves to the next candidate; they never abort the search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("studio mismatch: site '{site}' vs file '{file}' (similarity {similarity:.2})")]
    StudioMismatch {
        site: String,
        file: String,
        similarity: f64,
    },

    #[error("title mismatch: site '{site}' vs file '{file}' (similarity {similarity:.2})")]
    TitleMismatch {
        site: String,
        file: String,
        similarity: f64,
    },

    #[error("date mismatch: site date {site_date} outside window of filename year {file_year}")]
    DateMismatch {
        site_date: NaiveDate,
        file_year: u16,
    },

    #[error("unparseable site date '{raw}' for format '{format}'")]
    UnparseableDate { raw: String, format: String },
}

/// Matcher for one site's candidates against one film tuple.
pub struct CandidateMatcher<'a> {
    site: &'a SiteProfile,
    thresholds: &'a MatchThresholds,
}

impl<'a> CandidateMatcher<'a> {
    pub fn new(site: &'a SiteProfile, thresholds: &'a MatchThresholds) -> Self {
        Self { site, thresholds }
    }

    /// Evaluate one candidate. On acceptance the tuple is mutated with the
    /// confirmed fields (`site_url`, `compare_date`) and becomes final for
    /// search purposes.
    pub fn match_candidate(
        &self,
        candidate: &Candidate,
        info: &mut FilmInfo,
    ) -> Result<(), Rejection> {
        self.match_studio(&candidate.studio, info)?;
        self.match_title(&candidate.title, info)?;
        let compare_date = match &candidate.release_date {
            Some(raw) => Some(self.match_release_date(raw, info)?),
            None => None,
        };

        // all signals passed: finalize the tuple
        if let Some(date) = compare_date {
            info.compare_date = Some(date);
        }
        info.site_url = Some(self.site.absolute_url(&candidate.url));
        Ok(())
    }

    fn match_studio(&self, site_studio: &str, info: &FilmInfo) -> Result<(), Rejection> {
        let site_key = normalize::compare_studio(site_studio);
        if site_key == info.compare_studio {
            return Ok(());
        }
        let similarity = normalized_levenshtein(&site_key, &info.compare_studio);
        if similarity >= self.thresholds.studio {
            tracing::debug!(
                "Fuzzy studio accept: '{}' ~ '{}' ({:.2})",
                site_key,
                info.compare_studio,
                similarity
            );
            return Ok(());
        }
        Err(Rejection::StudioMismatch {
            site: site_studio.to_string(),
            file: info.studio.clone(),
            similarity,
        })
    }

    fn match_title(&self, site_title: &str, info: &FilmInfo) -> Result<(), Rejection> {
        let reordered = if self.site.titles_in_sort_order {
            normalize::reorder_sort_article(site_title)
        } else {
            site_title.to_string()
        };
        let mut site_key = normalize::compare_title(&reordered);

        // scene sites prefix the studio to the entry title
        if self.site.strip_studio_from_title {
            if let Some(stripped) = site_key.strip_prefix(&format!("{} ", info.compare_studio)) {
                site_key = stripped.to_string();
            } else if let Some(stripped) = site_key.strip_suffix(&format!(" at {}", info.compare_studio)) {
                site_key = stripped.to_string();
            }
        }

        if site_key == info.compare_title {
            return Ok(());
        }
        let similarity = normalized_levenshtein(&site_key, &info.compare_title);
        if similarity >= self.thresholds.title {
            tracing::debug!(
                "Fuzzy title accept: '{}' ~ '{}' ({:.2})",
                site_key,
                info.compare_title,
                similarity
            );
            return Ok(());
        }
        Err(Rejection::TitleMismatch {
            site: site_title.to_string(),
            file: info.title.clone(),
            similarity,
        })
    }

    /// Parse the site's date string and check it against the filename
    /// year. A bare 4-digit year (production year listings) is accepted as
    /// January 1st of that year.
    fn match_release_date(&self, raw: &str, info: &FilmInfo) -> Result<NaiveDate, Rejection> {
        let raw = raw.trim();
        let site_date = if let Ok(year) = raw.parse::<i32>() {
            NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| Rejection::UnparseableDate {
                raw: raw.to_string(),
                format: "year".to_string(),
            })?
        } else {
            NaiveDate::parse_from_str(raw, self.site.date_format).map_err(|_| {
                Rejection::UnparseableDate {
                    raw: raw.to_string(),
                    format: self.site.date_format.to_string(),
                }
            })?
        };

        // the filename year stays authoritative when absent from the site;
        // when both exist they may differ by one year at most, covering
        // releases whose nominal year spans a New-Year boundary
        if let Some(file_year) = info.year {
            let delta = (site_date.year() - file_year as i32).abs();
            if delta > 1 {
                return Err(Rejection::DateMismatch {
                    site_date,
                    file_year,
                });
            }
        }
        Ok(site_date)
    }
}
