//! Text helpers shared by catalog coercion and scoring.

use regex::Regex;
use std::sync::LazyLock;

static SLUG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex: slug separator"));

/// Trims and lower-cases.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// URL-safe identifier: runs of anything outside `[a-z0-9]` collapse to `-`,
/// with no leading or trailing dash.
pub fn slugify(text: &str) -> String {
    let lowered = normalize(text);
    let dashed = SLUG_SEPARATOR.replace_all(&lowered, "-");
    let trimmed = dashed.strip_prefix('-').unwrap_or(&dashed);
    trimmed.strip_suffix('-').unwrap_or(trimmed).to_string()
}

/// Symmetric substring containment on normalized strings.
///
/// False whenever either side is empty after trimming.
pub fn fuzzy_includes(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

/// Splits a comma-separated skills query into normalized, non-empty skills.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize)
        .filter(|skill| !skill.is_empty())
        .collect()
}
