use crate::models::{CatalogItem, RecommendedSession};

use super::text::slugify;

/// Title used when a record carries none of `title`, `name` or `topic`.
pub const UNTITLED_SESSION: &str = "Untitled Session";

/// URL used when a record has neither an id nor a link.
pub const NO_URL: &str = "#";

/// A catalog record after coercion. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSession {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Tags, skills, topic and skill, in that order. Duplicates kept.
    pub tags: Vec<String>,
}

fn first_non_empty<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|candidate| candidate.as_deref())
        .find(|value| !value.trim().is_empty())
}

impl NormalizedSession {
    /// Total: every record maps to a session through the fallback chains.
    pub fn from_item(item: &CatalogItem) -> Self {
        let title = first_non_empty(&[&item.title, &item.name, &item.topic])
            .unwrap_or(UNTITLED_SESSION)
            .to_string();
        let description = first_non_empty(&[&item.description, &item.summary])
            .unwrap_or_default()
            .to_string();

        let record_id = first_non_empty(&[&item.id]).map(str::trim);

        // Sessions with an id always point at the internal session page
        let url = match record_id {
            Some(id) => format!("/sessions/{}", id),
            None => first_non_empty(&[&item.url, &item.video_url, &item.link])
                .unwrap_or(NO_URL)
                .to_string(),
        };

        let id = match record_id {
            Some(id) => id.to_string(),
            None => {
                let from_title = slugify(&title);
                if from_title.is_empty() {
                    slugify(&url)
                } else {
                    from_title
                }
            }
        };

        let tags = item
            .tags
            .iter()
            .chain(&item.skills)
            .chain(item.topic.iter())
            .chain(item.skill.iter())
            .filter(|tag| !tag.trim().is_empty())
            .cloned()
            .collect();

        Self {
            id,
            title,
            description,
            url,
            tags,
        }
    }

    /// Drops the tags, keeping what clients see.
    pub fn into_recommended(self) -> RecommendedSession {
        RecommendedSession {
            id: self.id,
            title: self.title,
            description: self.description,
            url: self.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> NormalizedSession {
        NormalizedSession::from_item(&CatalogItem::from_value(value))
    }

    #[test]
    fn test_empty_record_uses_sentinels() {
        let session = normalize(json!({}));

        assert_eq!(session.title, UNTITLED_SESSION);
        assert_eq!(session.description, "");
        assert_eq!(session.url, NO_URL);
        assert_eq!(session.id, "untitled-session");
        assert!(session.tags.is_empty());
    }

    #[test]
    fn test_id_prefers_internal_session_page() {
        let session = normalize(json!({ "id": 7, "title": "Rust", "url": "https://videos.example/rust" }));

        assert_eq!(session.id, "7");
        assert_eq!(session.url, "/sessions/7");
    }

    #[test]
    fn test_float_id_points_at_integral_session_page() {
        let session = normalize(json!({ "id": 1.0, "title": "Rust" }));

        assert_eq!(session.id, "1");
        assert_eq!(session.url, "/sessions/1");
    }

    #[test]
    fn test_url_fallback_chain_without_id() {
        let session = normalize(json!({ "title": "Go Tour", "video_url": "https://v.example/go", "link": "https://l.example" }));
        assert_eq!(session.url, "https://v.example/go");
        assert_eq!(session.id, "go-tour");

        let session = normalize(json!({ "url": "", "link": "https://l.example" }));
        assert_eq!(session.url, "https://l.example");
    }

    #[test]
    fn test_id_slug_falls_back_to_url() {
        let session = normalize(json!({ "title": "???", "url": "https://cdn.example/Intro.mp4" }));

        assert_eq!(session.title, "???");
        assert_eq!(session.id, "https-cdn-example-intro-mp4");
    }

    #[test]
    fn test_title_and_description_aliases() {
        let session = normalize(json!({ "name": "", "topic": "Databases", "summary": "Indexes and joins" }));

        assert_eq!(session.title, "Databases");
        assert_eq!(session.description, "Indexes and joins");
    }

    #[test]
    fn test_tags_concatenate_in_order() {
        let session = normalize(json!({
            "tags": ["web", "frontend"],
            "skills": "react, typescript",
            "topic": "React",
            "skill": ""
        }));

        assert_eq!(session.tags, vec!["web", "frontend", "react", "typescript", "React"]);
    }

    #[test]
    fn test_into_recommended_drops_tags() {
        let recommended = normalize(json!({ "id": "abc", "title": "T", "tags": ["x"] })).into_recommended();

        assert_eq!(
            recommended,
            RecommendedSession {
                id: "abc".to_string(),
                title: "T".to_string(),
                description: String::new(),
                url: "/sessions/abc".to_string(),
            }
        );
    }
}
