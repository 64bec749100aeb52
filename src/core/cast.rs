//! Performer reconciliation.
//!
//! Scraped cast lists are noisy: alias suffixes, studio/brand tokens and
//! genre tags all arrive as "names". This module cleans the list, filters
//! out non-performers, and resolves what remains against the external
//! performer database with exact-then-fuzzy name matching.

use crate::core::normalize;
use crate::models::film::FilmInfo;
use crate::models::performer::{PerformerRecord, SexRole};
use crate::Result;
use std::collections::BTreeMap;
use strsim::normalized_levenshtein;

/// One performer entry as returned by the database search.
#[derive(Debug, Clone)]
pub struct DbPerformer {
    /// Database's spelling of the name.
    pub name: String,
    /// Headshot URL.
    pub photo: Option<String>,
    /// Recorded sex role, when the database lists one.
    pub role: Option<String>,
}

/// External collaborator: the performer database.
pub trait PerformerDatabase {
    /// Search for performers by name; returns all plausible entries, the
    /// caller picks the best one.
    fn search_performers(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DbPerformer>>> + Send;

    /// Whether the studio/title pairing itself resolves on the database.
    fn check_film(
        &self,
        studio: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Result of reconciling one scraped cast list.
#[derive(Debug, Default)]
pub struct CastResolution {
    /// Resolved records keyed by canonical name. Two input spellings that
    /// resolve to the same performer collapse to one entry, last write
    /// wins; pre-deduplicate inputs when that loss matters.
    pub cast: BTreeMap<String, PerformerRecord>,
    /// Input strings reclassified as genre tags.
    pub genres: Vec<String>,
}

/// Strip parenthetical aliases and "aka" suffixes from a scraped name:
/// `"John Doe (aka Johnny D)"` and `"John Doe aka Johnny D"` both reduce
/// to `"John Doe"`.
pub fn strip_aliases(name: &str) -> String {
    let mut s = name.replace('\u{2019}', "'");
    if let Some(pos) = s.find('(') {
        s.truncate(pos);
    }
    let lowered = s.to_lowercase();
    if let Some(pos) = lowered.find(" aka ") {
        s.truncate(pos);
    }
    s.trim().to_string()
}

/// Heuristic for studio/brand tokens masquerading as cast names:
/// domain-suffixed strings, "Movie"/"Series" marketing tokens, or names
/// whose normalized form is contained in the normalized studio name (and
/// vice versa, to catch "StudioX Productions" for studio "StudioX").
pub fn is_brand_token(name: &str, compare_studio: &str) -> bool {
    let lowered = name.to_lowercase();
    if [".com", ".net", ".tv"].iter().any(|d| lowered.contains(d)) {
        return true;
    }
    if lowered.contains("movie") || lowered.contains("series") {
        return true;
    }
    let key = normalize::normalize(name);
    if key.is_empty() || compare_studio.is_empty() {
        return false;
    }
    key.contains(compare_studio) || compare_studio.contains(&key)
}

/// Reconciler holding the configured keyword list and fuzzy threshold.
pub struct CastReconciler<'a> {
    genre_keywords: &'a [String],
    fuzzy_threshold: f64,
}

impl<'a> CastReconciler<'a> {
    pub fn new(genre_keywords: &'a [String], fuzzy_threshold: f64) -> Self {
        Self {
            genre_keywords,
            fuzzy_threshold,
        }
    }

    /// Resolve a scraped cast list against the performer database.
    ///
    /// Lookup failures are never fatal: the performer is recorded with
    /// `on_database = false` and the rest of the list proceeds.
    pub async fn resolve_cast<D: PerformerDatabase>(
        &self,
        names: &[String],
        film: &FilmInfo,
        db: &D,
    ) -> CastResolution {
        let mut resolution = CastResolution::default();
        let mut kept: Vec<String> = Vec::new();

        for raw in names {
            let name = strip_aliases(raw);
            if name.is_empty() {
                continue;
            }
            if self.is_genre_keyword(&name) {
                tracing::debug!("Reclassifying '{}' as genre tag", name);
                if !resolution.genres.iter().any(|g| g.eq_ignore_ascii_case(&name)) {
                    resolution.genres.push(name);
                }
                continue;
            }
            if is_brand_token(&name, &film.compare_studio) {
                tracing::debug!("Dropping studio/brand token '{}' from cast list", name);
                continue;
            }
            // summaries mention performers by first name only after the
            // full name has appeared; drop a bare name that repeats the
            // first token of an earlier full name ("John" after "John
            // Doe"), but never a distinct shorter name ("Ann" next to
            // "Anna Banana")
            if !name.contains(' ')
                && kept.iter().any(|earlier| {
                    earlier.contains(' ')
                        && earlier
                            .split_whitespace()
                            .next()
                            .is_some_and(|first| first.eq_ignore_ascii_case(&name))
                })
            {
                tracing::debug!("Dropping first-name repeat '{}'", name);
                continue;
            }
            if !kept.contains(&name) {
                kept.push(name);
            }
        }

        for name in kept {
            let record = self.resolve_one(&name, db).await;
            resolution
                .cast
                .insert(record.display_name().to_string(), record);
        }
        resolution
    }

    fn is_genre_keyword(&self, name: &str) -> bool {
        self.genre_keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(name.trim()))
    }

    /// Exact normalized match first, then the best fuzzy match above the
    /// threshold; unresolved names still produce a record so the legend
    /// can flag them downstream.
    async fn resolve_one<D: PerformerDatabase>(&self, name: &str, db: &D) -> PerformerRecord {
        let entries = match db.search_performers(name).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Performer lookup failed for '{}': {}", name, e);
                return PerformerRecord {
                    name: name.to_string(),
                    ..Default::default()
                };
            }
        };

        let key = normalize::normalize(name);
        let matched = entries
            .iter()
            .find(|e| normalize::normalize(&e.name) == key)
            .or_else(|| {
                entries
                    .iter()
                    .map(|e| (e, normalized_levenshtein(&normalize::normalize(&e.name), &key)))
                    .filter(|(_, score)| *score >= self.fuzzy_threshold)
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(e, score)| {
                        tracing::debug!("Fuzzy performer match '{}' ~ '{}' ({:.2})", e.name, name, score);
                        e
                    })
            });

        match matched {
            Some(entry) => PerformerRecord {
                name: name.to_string(),
                canonical_name: Some(entry.name.clone()),
                photo: entry.photo.clone(),
                role: entry
                    .role
                    .clone()
                    .map(SexRole::Recorded)
                    .unwrap_or(SexRole::Unknown),
                on_database: true,
            },
            None => {
                tracing::debug!("Performer '{}' not on database", name);
                PerformerRecord {
                    name: name.to_string(),
                    ..Default::default()
                }
            }
        }
    }
}
