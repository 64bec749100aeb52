//! Command implementations.

pub mod resolve_cast;
pub mod search;
pub mod sites;
pub mod update;
