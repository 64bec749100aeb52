//! Sites command implementation.

use crate::sites;
use anyhow::Result;
use colored::Colorize;

/// Execute the sites command: list the configured catalog sites.
pub fn execute_sites() -> Result<()> {
    println!("{}", "Configured sites:".bold());
    println!(
        " {:<14} | {:<10} | {:>5} | {}",
        "Name", "Pages", "Query", "Base URL"
    );
    println!("{}", "-".repeat(72));
    for site in sites::ALL_SITES {
        println!(
            " {:<14} | {:<10} | {:>5} | {}",
            site.name.cyan(),
            format!("up to {}", site.page_cap),
            site.max_query_len,
            site.base_url
        );
    }
    Ok(())
}
