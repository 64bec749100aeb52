//! Core matching engine: normalization, filename parsing, query building,
//! candidate matching, pagination and cast reconciliation.

pub mod cast;
pub mod matcher;
pub mod normalize;
pub mod pagination;
pub mod parser;
pub mod query;
