//! Performer records resolved against the external performer database.

use serde::{Deserialize, Serialize};

/// Sex role recorded by the performer database, when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SexRole {
    /// Role string as recorded by the database (e.g. "Top", "Bottom").
    Recorded(String),
    /// Database entry exists but records no role, or the performer was
    /// not found at all.
    Unknown,
}

impl Default for SexRole {
    fn default() -> Self {
        SexRole::Unknown
    }
}

/// One resolved cast name.
///
/// Created per scraped cast-name string, resolved once, never mutated
/// afterward. Folded into the output cast mapping keyed by the resolved
/// canonical name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformerRecord {
    /// Name as scraped from the site (after alias stripping).
    pub name: String,
    /// The database's spelling, when the lookup matched.
    pub canonical_name: Option<String>,
    /// Headshot URL from the database.
    pub photo: Option<String>,
    /// Sex role from the database.
    pub role: SexRole,
    /// Whether the performer was found on the database.
    pub on_database: bool,
}

impl PerformerRecord {
    /// Key under which this record lands in the output mapping: the
    /// database spelling when resolved, the scraped name otherwise.
    pub fn display_name(&self) -> &str {
        self.canonical_name.as_deref().unwrap_or(&self.name)
    }
}
