//! Resolve-cast command implementation.

use crate::core::cast::CastReconciler;
use crate::models::config::Config;
use crate::models::film::FilmInfo;
use crate::models::metadata::{LEGEND_ABSENT, LEGEND_FOUND};
use crate::models::performer::SexRole;
use crate::services::http::HtmlFetcher;
use crate::services::iafd::IafdClient;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the resolve-cast command: reconcile scraped names against the
/// performer database and print the outcome.
pub async fn execute_resolve_cast(
    config: &Config,
    match_file: &Path,
    names: &[String],
) -> Result<()> {
    let json = std::fs::read_to_string(match_file)?;
    let info = FilmInfo::from_match_result(&json)?;

    let fetcher = HtmlFetcher::new(config.delay_secs, config.cache_ttl_secs)?;
    let db = IafdClient::new(&fetcher);
    let reconciler = CastReconciler::new(&config.genre_keywords, config.thresholds.cast);
    let resolution = reconciler.resolve_cast(names, &info, &db).await;

    if resolution.cast.is_empty() && resolution.genres.is_empty() {
        println!("{}", "Nothing left after cleanup.".yellow());
        return Ok(());
    }

    if !resolution.cast.is_empty() {
        println!("{}", format!("Cast ({}):", resolution.cast.len()).bold());
        for (name, record) in &resolution.cast {
            let marker = if record.on_database {
                LEGEND_FOUND.green()
            } else {
                LEGEND_ABSENT.red()
            };
            let role = match &record.role {
                SexRole::Recorded(r) => format!(" [{r}]"),
                SexRole::Unknown => String::new(),
            };
            let alias = match record.canonical_name.as_deref() {
                Some(canonical) if canonical != record.name => {
                    format!(" (scraped as '{}')", record.name)
                }
                _ => String::new(),
            };
            println!("  {} {}{}{}", marker, name, role.dimmed(), alias.dimmed());
        }
    }

    if !resolution.genres.is_empty() {
        println!("{}", "Reclassified as genres:".bold());
        for genre in &resolution.genres {
            println!("  {genre}");
        }
    }
    Ok(())
}
