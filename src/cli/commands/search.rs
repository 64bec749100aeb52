//! Search command implementation.

use crate::core::pagination::PaginationDriver;
use crate::core::parser::FilenameParser;
use crate::models::config::Config;
use crate::models::film::FilmInfo;
use crate::services::http::HtmlFetcher;
use crate::services::scrape::{selectors_for, SelectorSearchProvider};
use crate::sites::{self, SiteProfile};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the search command: parse the filename, walk the site's
/// result pages, and print/save the match result.
pub async fn execute_search(
    config: &Config,
    file: &Path,
    site: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let parser = FilenameParser::from_config(config)?;
    let mut info = parser.parse_path(file)?;

    println!(
        "Parsed: {} - {} {}",
        info.studio.bold(),
        info.title.bold(),
        info.year
            .map(|y| format!("({y})"))
            .unwrap_or_default()
            .dimmed()
    );
    if let Some(series) = &info.series {
        println!(
            "Series: {} {}",
            series.name,
            series.part.map(|p| p.to_string()).unwrap_or_default()
        );
    }

    let fetcher = HtmlFetcher::new(config.delay_secs, config.cache_ttl_secs)?;
    let profiles: Vec<&'static SiteProfile> = match site {
        Some(name) => vec![sites::find_site(name)?],
        None => sites::ALL_SITES.to_vec(),
    };

    let mut matched = false;
    for profile in profiles {
        println!("Searching {}...", profile.name.cyan());
        let provider = SelectorSearchProvider::new(&fetcher, profile, selectors_for(profile));
        let driver = PaginationDriver::new(profile, &config.thresholds);
        match driver.search(&provider, &mut info).await {
            Ok(()) => {
                matched = true;
                break;
            }
            Err(crate::Error::NoMatchFound(_)) => {
                println!("{}", format!("No match on {}", profile.name).yellow());
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !matched {
        anyhow::bail!("No match found for '{}'", info.title);
    }

    print_match(&info);

    if let Some(path) = output {
        std::fs::write(path, info.to_match_result()?)?;
        println!("Match result written to {}", path.display());
    } else {
        println!("{}", info.to_match_result()?);
    }
    Ok(())
}

fn print_match(info: &FilmInfo) {
    println!();
    println!("{}", "Match found:".bold().green());
    println!("  Studio: {}", info.studio);
    println!("  Title:  {}", info.title);
    if let Some(date) = info.compare_date {
        println!("  Date:   {}", date);
    } else if let Some(year) = info.year {
        println!("  Year:   {}", year);
    }
    println!(
        "  URL:    {}",
        info.site_url.as_deref().unwrap_or_default().underline()
    );
    println!();
}
