//! Filename parser.
//!
//! Splits a base filename into the canonical (Studio, Title, Year, Series)
//! tuple using the configured capture pattern. The pattern must expose
//! named groups `studio` and `title`; `year` is optional in the pattern
//! and, depending on configuration, in the filename.

use crate::core::normalize;
use crate::models::config::Config;
use crate::models::film::{FilmInfo, Series};
use crate::Result;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// "Series Name 3 - Episode Title": series prefix with its own number.
fn series_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<series>.+?\S)\s+(?P<part>\d{1,2})\s*[-:]\s+(?P<rest>\S.*)$").unwrap())
}

/// "Title - Part 2": explicit part suffix; the stem doubles as the
/// series name.
fn part_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<series>.+?)\s*[-:]\s*(?:[Pp]art|[Pp]t\.?)\s+(?P<part>\d{1,2})$").unwrap())
}

/// Filename parser with a compiled capture pattern.
pub struct FilenameParser {
    pattern: Regex,
    year_mandatory: bool,
    collect_studio: bool,
    collect_title: bool,
}

impl FilenameParser {
    /// Compile the configured pattern. Fails when the pattern is invalid
    /// or lacks the `studio`/`title` groups.
    pub fn from_config(config: &Config) -> Result<Self> {
        let pattern = Regex::new(&config.filename_pattern)
            .map_err(|e| crate::Error::InvalidPattern(e.to_string()))?;
        for group in ["studio", "title"] {
            if !pattern.capture_names().flatten().any(|n| n == group) {
                return Err(crate::Error::InvalidPattern(format!(
                    "pattern is missing the required '{group}' capture group"
                )));
            }
        }
        Ok(Self {
            pattern,
            year_mandatory: config.year_mandatory,
            collect_studio: config.collections.studio,
            collect_title: config.collections.title,
        })
    }

    /// Parse a media file path. Only the base filename (extension
    /// stripped) participates in matching.
    pub fn parse_path(&self, path: &Path) -> Result<FilmInfo> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        self.parse(&stem)
    }

    /// Parse a base filename into the canonical tuple.
    pub fn parse(&self, filename: &str) -> Result<FilmInfo> {
        let caps = self
            .pattern
            .captures(filename.trim())
            .ok_or_else(|| crate::Error::PatternMismatch(filename.to_string()))?;

        let studio = caps
            .name("studio")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| crate::Error::PatternMismatch(filename.to_string()))?;
        let title = caps
            .name("title")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| crate::Error::PatternMismatch(filename.to_string()))?;

        let year: Option<u16> = caps.name("year").and_then(|m| m.as_str().parse().ok());
        if self.year_mandatory && year.is_none() {
            return Err(crate::Error::MissingYear(filename.to_string()));
        }

        let (series, search_title) = split_series(&title);

        let mut info = FilmInfo {
            compare_title: normalize::compare_title(&title),
            compare_studio: normalize::compare_studio(&studio),
            studio,
            title: title.clone(),
            search_title,
            series,
            year,
            ..Default::default()
        };

        if self.collect_studio {
            let studio = info.studio.clone();
            info.add_collection(&studio);
        }
        if self.collect_title {
            info.add_collection(&title);
            if let Some(series) = info.series.clone() {
                info.add_collection(&series.name);
                if let Some(part) = series.part {
                    info.add_collection(&format!("{} {}", series.name, part));
                }
            }
        }

        tracing::debug!(
            "Parsed '{}' -> studio='{}' title='{}' year={:?} series={:?}",
            filename,
            info.studio,
            info.title,
            info.year,
            info.series
        );
        Ok(info)
    }
}

/// Detect an embedded series marker and derive the search title.
///
/// Catalog search works best on the distinguishing part of the title, so
/// the series name/number is excluded from the search string while the
/// display title keeps it.
fn split_series(title: &str) -> (Option<Series>, String) {
    if let Some(caps) = part_suffix_re().captures(title) {
        let name = caps["series"].trim().to_string();
        let part = caps["part"].parse().ok();
        return (Some(Series { name: name.clone(), part }), name);
    }
    if let Some(caps) = series_prefix_re().captures(title) {
        let name = caps["series"].trim().to_string();
        let part = caps["part"].parse().ok();
        let rest = caps["rest"].trim().to_string();
        return (Some(Series { name, part }), rest);
    }
    (None, title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FilenameParser {
        FilenameParser::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let info = parser().parse("StudioX - Best Of Zak, The (2020)").unwrap();
        assert_eq!(info.studio, "StudioX");
        assert_eq!(info.title, "Best Of Zak, The");
        assert_eq!(info.year, Some(2020));
        assert_eq!(info.compare_title, "the best of zak");
        assert!(info.site_url.is_none());
    }

    #[test]
    fn test_parse_path_strips_extension() {
        let info = parser()
            .parse_path(Path::new("/media/StudioX - Film Night (2019).mkv"))
            .unwrap();
        assert_eq!(info.title, "Film Night");
        assert_eq!(info.year, Some(2019));
    }

    #[test]
    fn test_parse_no_year_optional() {
        let info = parser().parse("StudioX - Film Night").unwrap();
        assert_eq!(info.year, None);
    }

    #[test]
    fn test_parse_no_year_mandatory() {
        let config = Config {
            year_mandatory: true,
            ..Default::default()
        };
        let parser = FilenameParser::from_config(&config).unwrap();
        assert!(matches!(
            parser.parse("StudioX - Film Night"),
            Err(crate::Error::MissingYear(_))
        ));
    }

    #[test]
    fn test_parse_pattern_mismatch() {
        assert!(matches!(
            parser().parse("no separator here"),
            Err(crate::Error::PatternMismatch(_))
        ));
    }

    #[test]
    fn test_series_prefix_split() {
        let info = parser().parse("StudioX - Heat Wave 3 - Summer Nights (2021)").unwrap();
        let series = info.series.unwrap();
        assert_eq!(series.name, "Heat Wave");
        assert_eq!(series.part, Some(3));
        assert_eq!(info.search_title, "Summer Nights");
        assert_eq!(info.title, "Heat Wave 3 - Summer Nights");
    }

    #[test]
    fn test_part_suffix_split() {
        let info = parser().parse("StudioX - Big Night - Part 2 (2021)").unwrap();
        let series = info.series.unwrap();
        assert_eq!(series.name, "Big Night");
        assert_eq!(series.part, Some(2));
        assert_eq!(info.search_title, "Big Night");
    }

    #[test]
    fn test_collections_seeded() {
        let config = Config::default();
        assert!(config.collections.title);
        let info = parser().parse("StudioX - Heat Wave 3 - Summer Nights (2021)").unwrap();
        assert!(info.collections.iter().any(|c| c == "Heat Wave"));
        assert!(info.collections.iter().any(|c| c == "Heat Wave 3"));
        // studio toggle is off by default
        assert!(!info.collections.iter().any(|c| c == "StudioX"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = Config {
            filename_pattern: "(unclosed".to_string(),
            ..Default::default()
        };
        assert!(FilenameParser::from_config(&config).is_err());

        let config = Config {
            filename_pattern: "^(?P<studio>.+)$".to_string(),
            ..Default::default()
        };
        assert!(FilenameParser::from_config(&config).is_err());
    }
}
