//! Data models.

pub mod candidate;
pub mod config;
pub mod film;
pub mod metadata;
pub mod performer;
