//! Final metadata record handed back to the plugin host.

use crate::models::performer::{PerformerRecord, SexRole};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marker shown in the cast legend for a performer absent from the
/// performer database (red cross mark).
pub const LEGEND_ABSENT: &str = "\u{274C}";
/// Marker for a performer found on the database (white tick on green).
pub const LEGEND_FOUND: &str = "\u{2705}";
/// Marker for the film itself being on the database.
pub const LEGEND_THUMBS_UP: &str = "\u{1F44D}";
/// Marker for the film missing from the database.
pub const LEGEND_THUMBS_DOWN: &str = "\u{1F44E}";

/// Adult content rating applied to every record.
pub const CONTENT_RATING: &str = "X";
/// Content rating age applied to every record.
pub const CONTENT_RATING_AGE: u8 = 18;

/// One chapter entry, offsets in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub start_offset_ms: u64,
    pub end_offset_ms: u64,
}

/// One cast entry in the final record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastEntry {
    pub name: String,
    pub photo: Option<String>,
    pub role: String,
}

/// The enriched metadata record for a matched film.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilmMetadata {
    pub studio: String,
    pub title: String,
    /// Tagline carries the matched detail-page URL.
    pub tagline: String,
    pub release_date: Option<NaiveDate>,
    pub year: Option<u16>,
    pub content_rating: String,
    pub content_rating_age: u8,
    pub collections: Vec<String>,
    pub genres: Vec<String>,
    pub compilation: bool,
    pub cast: Vec<CastEntry>,
    pub directors: Vec<String>,
    pub poster_url: Option<String>,
    pub art_url: Option<String>,
    /// Cast legend plus (possibly translated) synopsis.
    pub summary: String,
    pub chapters: Vec<Chapter>,
}

impl FilmMetadata {
    /// Compose the summary from the cast legend and a synopsis.
    ///
    /// `prefix_legend` places the legend before the synopsis, otherwise
    /// after. `film_on_database` selects the thumbs-up/down marker.
    pub fn compose_summary(synopsis: &str, film_on_database: bool, prefix_legend: bool) -> String {
        let film_marker = if film_on_database {
            LEGEND_THUMBS_UP
        } else {
            LEGEND_THUMBS_DOWN
        };
        let legend = format!(
            "CAST LEGEND\u{2003}{LEGEND_ABSENT} Actor not on IAFD\u{2003}{LEGEND_FOUND} Actor on IAFD\u{2003}:: {film_marker} Film on IAFD ::"
        );
        let combined = if prefix_legend {
            format!("{legend}\n{}", synopsis.trim())
        } else {
            format!("{}\n{legend}", synopsis.trim())
        };
        combined.replace("\n\n", "\n")
    }

    /// Add the cast mapping to the record in alphabetical order,
    /// optionally mirroring names into collections.
    pub fn set_cast(&mut self, cast: &std::collections::BTreeMap<String, PerformerRecord>, collect: bool) {
        self.cast.clear();
        for (name, record) in cast {
            let role = match &record.role {
                SexRole::Recorded(r) => r.clone(),
                SexRole::Unknown => String::new(),
            };
            self.cast.push(CastEntry {
                name: name.clone(),
                photo: record.photo.clone(),
                role,
            });
            if collect {
                self.collections.push(name.clone());
            }
        }
    }
}

/// Shift site-scraped chapters so their total aligns with the file
/// duration, assuming any positive delta is disclaimers/intro footage at
/// the start of the file. Returns `None` when the durations disagree by
/// more than the tolerance or the delta is negative.
pub fn align_chapters(
    chapters: &[Chapter],
    file_duration_ms: u64,
    tolerance_ms: u64,
) -> Option<Vec<Chapter>> {
    if chapters.is_empty() {
        return None;
    }
    let total: u64 = chapters
        .iter()
        .map(|c| c.end_offset_ms.saturating_sub(c.start_offset_ms))
        .sum();
    let delta = file_duration_ms as i64 - total as i64;
    if delta < 0 || delta.unsigned_abs() >= tolerance_ms {
        return None;
    }
    let shift = delta as u64;
    Some(
        chapters
            .iter()
            .map(|c| Chapter {
                title: c.title.clone(),
                start_offset_ms: c.start_offset_ms + shift,
                end_offset_ms: c.end_offset_ms + shift,
            })
            .collect(),
    )
}
