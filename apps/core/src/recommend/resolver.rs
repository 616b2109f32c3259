//! Skill matching against the session catalog.
//!
//! A session earns one point per field group (title, description, tags) in which any
//! requested skill fuzzy-matches, so scores range over 0..=3. Sessions scoring zero
//! are dropped and the rest are ordered by score, keeping catalog order among equals.

use tracing::debug;

use crate::models::{CatalogItem, RecommendedSession};

use super::session::NormalizedSession;
use super::text::{fuzzy_includes, parse_skills};

#[cfg(test)]
pub const MAX_SCORE: u8 = 3;

/// A normalized session paired with its match score for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSession {
    pub session: NormalizedSession,
    pub score: u8,
}

/// Scores one session. Each hit is a flag, so repeated skills never add up.
pub fn score_session(session: &NormalizedSession, skills: &[String]) -> u8 {
    let title_hit = skills.iter().any(|skill| fuzzy_includes(&session.title, skill));
    let description_hit = skills
        .iter()
        .any(|skill| fuzzy_includes(&session.description, skill));
    let tag_hit = session
        .tags
        .iter()
        .any(|tag| skills.iter().any(|skill| fuzzy_includes(tag, skill)));

    u8::from(title_hit) + u8::from(description_hit) + u8::from(tag_hit)
}

/// Normalizes, scores, filters and orders the catalog for already-parsed skills.
pub fn rank(skills: &[String], catalog: &[CatalogItem]) -> Vec<ScoredSession> {
    if skills.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<ScoredSession> = catalog
        .iter()
        .map(NormalizedSession::from_item)
        .map(|session| {
            let score = score_session(&session, skills);
            ScoredSession { session, score }
        })
        .filter(|scored| scored.score > 0)
        .collect();

    // sort_by is stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Resolves a raw comma-separated skills query into recommended sessions.
///
/// An empty query matches nothing, whatever the catalog holds.
pub fn resolve(raw_skills_query: &str, catalog: &[CatalogItem]) -> Vec<RecommendedSession> {
    let skills = parse_skills(raw_skills_query);
    debug!(?skills, catalog_size = catalog.len(), "Resolving recommendations");

    let matches: Vec<RecommendedSession> = rank(&skills, catalog)
        .into_iter()
        .map(|scored| scored.session.into_recommended())
        .collect();

    debug!(
        count = matches.len(),
        titles = ?matches.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
        "Resolved recommendations"
    );
    matches
}
