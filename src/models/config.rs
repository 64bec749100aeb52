//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filename capture pattern with named groups
    /// `studio`, `title`, `year` (year group optional).
    pub filename_pattern: String,
    /// Whether a year is mandatory in the filename.
    pub year_mandatory: bool,
    /// Inter-request delay in seconds, to avoid rate-limiting.
    pub delay_secs: u64,
    /// HTTP response cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Detect the synopsis language and translate when it differs from
    /// the library language.
    pub detect_language: bool,
    /// Library language code handed to the translator.
    pub library_language: String,
    /// Place the cast legend before the synopsis instead of after.
    pub prefix_legend: bool,
    /// Clear previously set collections before updating.
    pub clear_collections: bool,
    /// Fetch background art in addition to the poster.
    pub background_art: bool,
    /// Collection population toggles.
    pub collections: CollectionToggles,
    /// Fuzzy match thresholds.
    pub thresholds: MatchThresholds,
    /// Keywords that mark a scraped "cast name" as a genre tag instead.
    pub genre_keywords: Vec<String>,
}

/// Independent collection-population toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionToggles {
    pub studio: bool,
    pub title: bool,
    pub genre: bool,
    pub director: bool,
    pub cast: bool,
    pub country: bool,
}

/// Similarity thresholds for fuzzy matching (normalized Levenshtein,
/// 1.0 = identical).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    /// Title acceptance: tolerates small typographic drift, rejects
    /// different films.
    pub title: f64,
    /// Studio acceptance; stricter than titles.
    pub studio: f64,
    /// Performer name acceptance against the database.
    pub cast: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename_pattern:
                r"^(?P<studio>[^-]+?)\s*-\s*(?P<title>.+?)(?:\s*\((?P<year>\d{4})\))?$".to_string(),
            year_mandatory: false,
            delay_secs: 10,
            cache_ttl_secs: 7 * 24 * 60 * 60,
            detect_language: false,
            library_language: "en".to_string(),
            prefix_legend: true,
            clear_collections: false,
            background_art: true,
            collections: CollectionToggles::default(),
            thresholds: MatchThresholds::default(),
            genre_keywords: default_genre_keywords(),
        }
    }
}

fn default_genre_keywords() -> Vec<String> {
    [
        "Anal", "Bareback", "Bear", "Compilation", "Group", "Interracial",
        "Muscle", "Oral", "Orgy", "Solo", "Threesome", "Twink",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for CollectionToggles {
    fn default() -> Self {
        Self {
            studio: false,
            title: true,
            genre: false,
            director: false,
            cast: false,
            country: false,
        }
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            title: 0.85,
            studio: 0.90,
            cast: 0.75,
        }
    }
}

impl Config {
    /// Validate threshold ranges. Out-of-range values would silently
    /// accept or reject everything.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("title", self.thresholds.title),
            ("studio", self.thresholds.studio),
            ("cast", self.thresholds.cast),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::Error::InvalidConfig(format!(
                    "threshold '{name}' must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        if self.filename_pattern.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "filename_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("film_agent")
}

/// Load configuration from an explicit file, falling back to defaults
/// when the file is absent or unreadable.
pub fn load_config_from(path: &Path) -> Config {
    if path.exists() {
        if let Ok(content) = std::fs::read_to_string(path) {
            match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                }
            }
        }
    }
    Config::default()
}

/// Load configuration from the default location.
pub fn load_config() -> Config {
    load_config_from(&dirs_config_path().join("config.toml"))
}
