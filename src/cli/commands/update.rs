//! Update command implementation.

use crate::core::cast::{CastReconciler, PerformerDatabase};
use crate::models::config::Config;
use crate::models::film::FilmInfo;
use crate::models::metadata::{self, Chapter, FilmMetadata, CONTENT_RATING, CONTENT_RATING_AGE};
use crate::services::http::HtmlFetcher;
use crate::services::iafd::IafdClient;
use crate::services::translate::{NoopTranslator, Translator};
use anyhow::Result;
use chrono::Datelike;
use colored::Colorize;
use std::path::Path;

/// Shift tolerance for chapter alignment, in milliseconds. Disclaimer
/// and intro footage rarely runs longer than this.
const CHAPTER_TOLERANCE_MS: u64 = 90_000;

/// Execute the update command: rebuild the film record from a saved
/// match result and assemble the full metadata record.
#[allow(clippy::too_many_arguments)]
pub async fn execute_update(
    config: &Config,
    match_file: &Path,
    synopsis: Option<&Path>,
    cast: Option<&Path>,
    chapters: Option<&Path>,
    duration_ms: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let json = std::fs::read_to_string(match_file)?;
    let mut info = FilmInfo::from_match_result(&json)?;

    let fetcher = HtmlFetcher::new(config.delay_secs, config.cache_ttl_secs)?;
    let db = IafdClient::new(&fetcher);

    info.found_on_iafd = match db.check_film(&info.studio, &info.title).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Film database check failed: {}", e);
            false
        }
    };

    let mut record = FilmMetadata {
        studio: info.studio.clone(),
        title: info.title.clone(),
        tagline: info.site_url.clone().unwrap_or_default(),
        release_date: info.compare_date,
        year: info
            .compare_date
            .map(|d| d.year() as u16)
            .or(info.year),
        content_rating: CONTENT_RATING.to_string(),
        content_rating_age: CONTENT_RATING_AGE,
        collections: base_collections(config, &info),
        compilation: info.compilation,
        ..Default::default()
    };

    if let Some(path) = cast {
        let names: Vec<String> = std::fs::read_to_string(path)?
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let reconciler = CastReconciler::new(&config.genre_keywords, config.thresholds.cast);
        let resolution = reconciler.resolve_cast(&names, &info, &db).await;
        print_cast(&resolution.cast);
        record.set_cast(&resolution.cast, config.collections.cast);
        for genre in resolution.genres {
            if genre.eq_ignore_ascii_case("compilation") {
                record.compilation = true;
            }
            if config.collections.genre && !record.collections.contains(&genre) {
                record.collections.push(genre.clone());
            }
            record.genres.push(genre);
        }
    }

    let synopsis_text = match synopsis {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            if config.detect_language {
                let translator = NoopTranslator;
                translator.translate(&text, &config.library_language).await?
            } else {
                text
            }
        }
        None => String::new(),
    };
    record.summary = FilmMetadata::compose_summary(
        &synopsis_text,
        info.found_on_iafd,
        config.prefix_legend,
    );

    if let (Some(path), Some(duration)) = (chapters, duration_ms) {
        let scraped: Vec<Chapter> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        match metadata::align_chapters(&scraped, duration, CHAPTER_TOLERANCE_MS) {
            Some(aligned) => record.chapters = aligned,
            None => {
                println!(
                    "{}",
                    "Chapter durations disagree with the file; skipping chapters".yellow()
                );
            }
        }
    }

    let json = serde_json::to_string_pretty(&record)?;
    if let Some(path) = output {
        std::fs::write(path, &json)?;
        println!("Metadata record written to {}", path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

/// Starting collection set for the record. `clear_collections` drops the
/// tags carried over from the match result so only the ones assembled
/// during this update survive; the studio toggle applies either way.
fn base_collections(config: &Config, info: &FilmInfo) -> Vec<String> {
    let mut collections = if config.clear_collections {
        Vec::new()
    } else {
        info.collections.clone()
    };
    if config.collections.studio && !collections.iter().any(|c| c == &info.studio) {
        collections.push(info.studio.clone());
    }
    collections
}

fn print_cast(
    cast: &std::collections::BTreeMap<String, crate::models::performer::PerformerRecord>,
) {
    if cast.is_empty() {
        return;
    }
    println!("{}", format!("Cast ({}):", cast.len()).bold());
    for (name, record) in cast {
        let marker = if record.on_database {
            metadata::LEGEND_FOUND.green()
        } else {
            metadata::LEGEND_ABSENT.red()
        };
        println!("  {} {}", marker, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_collections() -> FilmInfo {
        FilmInfo {
            studio: "StudioX".to_string(),
            title: "Heat Wave 3 - Summer Nights".to_string(),
            collections: vec!["Heat Wave".to_string(), "Heat Wave 3".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_collections_carried_over_by_default() {
        let config = Config::default();
        assert!(!config.clear_collections);
        let collections = base_collections(&config, &info_with_collections());
        assert_eq!(collections, vec!["Heat Wave", "Heat Wave 3"]);
    }

    #[test]
    fn test_clear_collections_drops_carried_tags() {
        let config = Config {
            clear_collections: true,
            ..Default::default()
        };
        let collections = base_collections(&config, &info_with_collections());
        assert!(collections.is_empty());
    }

    #[test]
    fn test_studio_toggle_applies_after_clearing() {
        let mut config = Config {
            clear_collections: true,
            ..Default::default()
        };
        config.collections.studio = true;
        let collections = base_collections(&config, &info_with_collections());
        assert_eq!(collections, vec!["StudioX"]);
    }
}
