//! Canonical film record threading search, match and update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Series membership parsed out of a filename title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series name without the part number.
    pub name: String,
    /// Part/volume number within the series.
    pub part: Option<u32>,
}

/// Canonical entity tuple for one film.
///
/// Built by the filename parser, refined by the candidate matcher, and
/// carried from `search` to `update` as an opaque JSON artifact. `studio`
/// and `title` are never empty once the parser returns one of these;
/// `site_url` stays `None` until a candidate has been accepted, after which
/// the record is final for search purposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilmInfo {
    /// Studio name from the filename.
    pub studio: String,
    /// Display title from the filename.
    pub title: String,
    /// Title used to build the web search query; excludes the series
    /// name/number when the film is part of a series.
    pub search_title: String,
    /// Normalized title used only for matching, never displayed.
    pub compare_title: String,
    /// Normalized studio used only for matching.
    pub compare_studio: String,
    /// Series name and part, when the title embeds one.
    pub series: Option<Series>,
    /// Release year from the filename.
    pub year: Option<u16>,
    /// Confirmed release date once a candidate's site date matched.
    /// Distinct from `year`: a full site date disambiguates same-titled
    /// films and survives New-Year-boundary releases.
    pub compare_date: Option<NaiveDate>,
    /// Collection tags accumulated from the filename (title parts, series).
    pub collections: Vec<String>,
    /// Detail-page URL, set only after a successful match.
    pub site_url: Option<String>,
    /// Whether the studio/title pairing resolves on the performer database.
    pub found_on_iafd: bool,
    /// Set when any genre signal marks the release as a compilation.
    pub compilation: bool,
}

impl FilmInfo {
    /// Add a collection tag, keeping insertion order and skipping
    /// case-insensitive duplicates.
    pub fn add_collection(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        if !self
            .collections
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
        {
            self.collections.push(name.to_string());
        }
    }

    /// Serialize as the opaque match-result artifact handed to `update`.
    pub fn to_match_result(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a record from a match-result artifact.
    pub fn from_match_result(json: &str) -> crate::Result<Self> {
        let info: FilmInfo = serde_json::from_str(json)
            .map_err(|e| crate::Error::InvalidMatchResult(e.to_string()))?;
        if info.site_url.is_none() {
            return Err(crate::Error::InvalidMatchResult(
                "match result has no site URL".to_string(),
            ));
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_collection_dedup() {
        let mut info = FilmInfo::default();
        info.add_collection("Series X");
        info.add_collection("series x");
        info.add_collection("  ");
        assert_eq!(info.collections, vec!["Series X"]);
    }

    #[test]
    fn test_match_result_round_trip() {
        let info = FilmInfo {
            studio: "StudioX".to_string(),
            title: "The Best Of Zak".to_string(),
            site_url: Some("https://example.com/film/1".to_string()),
            year: Some(2020),
            ..Default::default()
        };
        let json = info.to_match_result().unwrap();
        let back = FilmInfo::from_match_result(&json).unwrap();
        assert_eq!(back.studio, "StudioX");
        assert_eq!(back.year, Some(2020));
    }

    #[test]
    fn test_match_result_requires_site_url() {
        let info = FilmInfo {
            studio: "StudioX".to_string(),
            title: "Unmatched".to_string(),
            ..Default::default()
        };
        let json = info.to_match_result().unwrap();
        assert!(FilmInfo::from_match_result(&json).is_err());
    }
}
