use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::assistant::Persona;

/// A raw session record as served by the upstream catalog.
///
/// Upstream records are loosely shaped: identifiers may be numbers, list fields may
/// arrive as comma-separated strings, and any field may be missing or null. Every field
/// is therefore optional and decoded leniently; `NormalizedSession::from_item` is the
/// only consumer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    /// Direct session URL if provided
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skill: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Decodes one upstream record. Anything that is not a JSON object yields an empty item.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Largest magnitude at which every integral `f64` is exact
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Numbers print the way JavaScript's `String()` does for ordinary values: `1.0` is `"1"`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let entries: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        other => scalar_text(&other).into_iter().collect(),
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// One recommended session, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedSession {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Body of `GET /api/recommendations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub videos: Vec<RecommendedSession>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = 2000))]
    pub message: String,
    #[serde(default)]
    pub persona: Persona,
    /// Role hint held by the client profile ("mentor", "learner").
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub persona: Persona,
    /// Name of the rule that produced the reply, `exact` or `fallback`.
    pub rule: String,
}

/// A user profile considered by the mentor recommender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: String,
    #[serde(default)]
    pub skills_known: Vec<String>,
    #[serde(default)]
    pub skills_to_learn: Vec<String>,
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MentorQuery {
    pub users: Vec<MentorProfile>,
    pub target_skill: String,
    #[serde(default = "default_top_k")]
    #[validate(range(min = 1, max = 100))]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorMatch {
    pub user_id: String,
    /// Cosine similarity (0.0 - 1.0)
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorRecommendations {
    pub mentors: Vec<MentorMatch>,
    pub next_skills: Vec<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
