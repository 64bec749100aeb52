//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Film Agent - match media filenames against adult film catalog sites
#[derive(Parser, Debug)]
#[command(name = "film-agent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to an alternate config file
    #[arg(long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a filename and search a catalog site for the film
    Search {
        /// Media file path or bare filename
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Site to search (see `sites`); all sites are tried in order
        /// when omitted
        #[arg(short, long)]
        site: Option<String>,

        /// Write the match result JSON to this path
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Build the full metadata record from a saved match result
    Update {
        /// Path to the match result JSON produced by `search`
        #[arg(value_name = "MATCH_FILE")]
        match_file: PathBuf,

        /// File containing the scraped synopsis text
        #[arg(long, value_name = "SYNOPSIS_FILE")]
        synopsis: Option<PathBuf>,

        /// File containing scraped cast names, one per line
        #[arg(long, value_name = "CAST_FILE")]
        cast: Option<PathBuf>,

        /// File containing scraped chapters as JSON
        #[arg(long, value_name = "CHAPTERS_FILE")]
        chapters: Option<PathBuf>,

        /// Duration of the media file in milliseconds, for chapter
        /// alignment
        #[arg(long, value_name = "MS")]
        duration_ms: Option<u64>,

        /// Write the metadata record JSON to this path
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Reconcile scraped cast names against the performer database
    ResolveCast {
        /// Path to the match result JSON produced by `search`
        #[arg(value_name = "MATCH_FILE")]
        match_file: PathBuf,

        /// Scraped cast names
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },

    /// List the configured catalog sites
    Sites,
}
