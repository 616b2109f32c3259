//! Recommend Tests
//!
//! Catalog fetch, normalization and ranking working together against a mocked catalog.

use crate::models::{CatalogItem, RecommendedSession};
use crate::recommend::resolver::{rank, MAX_SCORE};
use crate::recommend::session::{NormalizedSession, NO_URL, UNTITLED_SESSION};
use crate::recommend::text::fuzzy_includes;
use crate::recommend::{parse_skills, resolve, CatalogSource, HttpCatalog};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn catalog_serving(body: serde_json::Value) -> (MockServer, HttpCatalog) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let catalog = HttpCatalog::new(
        &format!("{}/api/sessions/", mock_server.uri()),
        Duration::from_secs(2),
    )
    .unwrap();
    (mock_server, catalog)
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_messy_upstream_records_are_ranked() {
        let (_server, catalog) = catalog_serving(json!({
            "data": [
                { "id": 10, "name": "Pandas in Practice", "skills": "python, pandas" },
                null,
                { "title": "Intro to Python", "video_url": "https://cdn.example/py.mp4" },
                { "id": "x", "topic": "Gardening" },
                { "title": "", "summary": "Python for data folks", "link": "https://l.example/p" }
            ]
        }))
        .await;

        let items = catalog.fetch_catalog().await;
        assert_eq!(items.len(), 5);

        let result = resolve("Python", &items);

        assert_eq!(
            result,
            vec![
                RecommendedSession {
                    id: "10".to_string(),
                    title: "Pandas in Practice".to_string(),
                    description: String::new(),
                    url: "/sessions/10".to_string(),
                },
                RecommendedSession {
                    id: "intro-to-python".to_string(),
                    title: "Intro to Python".to_string(),
                    description: String::new(),
                    url: "https://cdn.example/py.mp4".to_string(),
                },
                RecommendedSession {
                    id: "untitled-session".to_string(),
                    title: UNTITLED_SESSION.to_string(),
                    description: "Python for data folks".to_string(),
                    url: "https://l.example/p".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_query_matches_nothing_from_live_catalog() {
        let (_server, catalog) =
            catalog_serving(json!([{ "id": 1, "title": "Python Basics" }])).await;

        let items = catalog.fetch_catalog().await;

        assert_eq!(items.len(), 1);
        assert!(resolve("", &items).is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_resolves_to_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let catalog = HttpCatalog::new(&mock_server.uri(), Duration::from_secs(1)).unwrap();
        let items = catalog.fetch_catalog().await;

        assert!(items.is_empty());
        assert!(resolve("python", &items).is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    fn sample_catalog() -> Vec<CatalogItem> {
        vec![
            json!({ "id": 1, "title": "Python Basics", "tags": ["beginner"] }),
            json!({ "id": 2, "title": "React Workshop", "description": "Learn hooks" }),
            json!({ "title": "SQL", "description": "sql and python", "tags": "sql,python" }),
            json!({}),
            json!({ "id": 0, "topic": "Rust" }),
        ]
        .into_iter()
        .map(CatalogItem::from_value)
        .collect()
    }

    #[test]
    fn test_empty_record_sentinels() {
        let session = NormalizedSession::from_item(&CatalogItem::default());
        assert_eq!(session.title, UNTITLED_SESSION);
        assert_eq!(session.url, NO_URL);
    }

    #[test]
    fn test_fuzzy_includes_is_symmetric() {
        let words = ["", "py", "Python", "python basics", "REACT", "re", "sql", " sql "];
        for a in words {
            for b in words {
                assert_eq!(fuzzy_includes(a, b), fuzzy_includes(b, a), "'{}' vs '{}'", a, b);
            }
        }
    }

    #[test]
    fn test_scores_stay_in_range() {
        let catalog = sample_catalog();
        for query in ["python", "sql, python", "rust", "hooks, react, python"] {
            for scored in rank(&parse_skills(query), &catalog) {
                assert!((1..=MAX_SCORE).contains(&scored.score), "query '{}'", query);
            }
        }
    }

    #[test]
    fn test_known_scenarios() {
        let catalog = sample_catalog();

        let python: Vec<String> = resolve("python, react", &catalog)
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(python, vec!["SQL", "Python Basics", "React Workshop"]);

        assert!(resolve("sql", &catalog[1..2]).is_empty());
        assert!(resolve("", &catalog).is_empty());
        assert_eq!(resolve("rust", &catalog)[0].url, "/sessions/0");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let catalog = sample_catalog();
        assert_eq!(resolve("python, sql", &catalog), resolve("python, sql", &catalog));
    }
}
