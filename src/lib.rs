//! Film Agent - title matching and metadata reconciliation for adult
//! film catalog sites.
//!
//! The engine turns a noisy media filename into a canonical
//! (Studio, Title, Year, Series) record, searches a catalog site for the
//! matching release, and reconciles the scraped cast list against an
//! external performer database. Site markup and HTTP live behind the
//! collaborator traits in [`core`]; everything that differs between
//! sites is data in [`sites`].

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod services;
pub mod sites;

pub use error::{Error, Result};
