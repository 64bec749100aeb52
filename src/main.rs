//! Film Agent CLI
//!
//! A command-line tool for matching media filenames against adult film
//! catalog sites and building metadata records.

use clap::Parser;
use film_agent::cli::{
    args::{Cli, Commands},
    commands::{resolve_cast, search, sites, update},
};
use film_agent::models::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Load and validate configuration
    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    config.validate()?;

    // Run the appropriate command
    match cli.command {
        Commands::Search { file, site, output } => {
            search::execute_search(&config, &file, site.as_deref(), output.as_deref()).await?;
        }

        Commands::Update {
            match_file,
            synopsis,
            cast,
            chapters,
            duration_ms,
            output,
        } => {
            update::execute_update(
                &config,
                &match_file,
                synopsis.as_deref(),
                cast.as_deref(),
                chapters.as_deref(),
                duration_ms,
                output.as_deref(),
            )
            .await?;
        }

        Commands::ResolveCast { match_file, names } => {
            resolve_cast::execute_resolve_cast(&config, &match_file, &names).await?;
        }

        Commands::Sites => {
            sites::execute_sites()?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("film_agent=debug")
    } else {
        EnvFilter::new("film_agent=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
