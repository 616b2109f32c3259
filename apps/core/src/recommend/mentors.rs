//! Mentor recommendation using TF-IDF.
//!
//! Each user's known skills form one document. The target skill is vectorized with the
//! same vocabulary and users are ranked by cosine similarity. Terms that weigh most
//! across the best-ranked users become the suggested next skills.

use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{MentorMatch, MentorProfile, MentorQuery, MentorRecommendations};

/// Words of two or more word characters
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Dense TF-IDF matrix over a small corpus.
struct TfidfMatrix {
    /// Alphabetically ordered terms
    vocabulary: Vec<String>,
    /// One L2-normalized row per document
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    fn fit(documents: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| tokenize(doc)).collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        let mut counts = Vec::with_capacity(tokenized.len());
        for tokens in &tokenized {
            let mut row = vec![0.0; vocabulary.len()];
            for token in tokens {
                row[index[token.as_str()]] += 1.0;
            }
            for (df, count) in document_frequency.iter_mut().zip(&row) {
                if *count > 0.0 {
                    *df += 1;
                }
            }
            counts.push(row);
        }

        // Smoothed IDF, as if one extra document contained every term once
        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|mut row| {
                for (weight, term_idf) in row.iter_mut().zip(&idf) {
                    *weight *= term_idf;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Self { vocabulary, rows }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in row.iter_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity of two already-normalized rows
fn cosine(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn by_weight_desc(a: &f64, b: &f64) -> Ordering {
    b.partial_cmp(a).unwrap_or(Ordering::Equal)
}

/// Ranks mentors for a target skill and suggests what to learn next
pub struct MentorRecommender {
    /// Terms considered before removing the target's own words
    candidate_terms: usize,
    max_next_skills: usize,
}

impl Default for MentorRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl MentorRecommender {
    pub fn new() -> Self {
        Self::with_config(10, 5)
    }

    pub fn with_config(candidate_terms: usize, max_next_skills: usize) -> Self {
        Self {
            candidate_terms,
            max_next_skills,
        }
    }

    pub fn recommend_for(&self, query: &MentorQuery) -> MentorRecommendations {
        self.recommend(&query.users, &query.target_skill, query.top_k)
    }

    /// Ranks `users` against `target_skill`, keeping the `top_k` best with a positive score.
    pub fn recommend(
        &self,
        users: &[MentorProfile],
        target_skill: &str,
        top_k: usize,
    ) -> MentorRecommendations {
        if users.is_empty() {
            return MentorRecommendations::default();
        }

        let mut documents: Vec<String> = users.iter().map(|u| u.skills_known.join(" ")).collect();
        documents.push(target_skill.to_string());

        let matrix = TfidfMatrix::fit(&documents);
        let Some((target_row, user_rows)) = matrix.rows.split_last() else {
            return MentorRecommendations::default();
        };

        let mut ranked: Vec<(usize, f64)> = user_rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, cosine(target_row, row)))
            .collect();
        // Stable: equal similarities keep input order
        ranked.sort_by(|a, b| by_weight_desc(&a.1, &b.1));
        ranked.truncate(top_k);

        let mentors: Vec<MentorMatch> = ranked
            .iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(i, score)| MentorMatch {
                user_id: users[*i].id.clone(),
                score: *score,
            })
            .collect();

        let next_skills = self.next_skills(&matrix.vocabulary, user_rows, &ranked, target_skill);

        debug!(
            users = users.len(),
            mentors = mentors.len(),
            ?next_skills,
            "Mentor recommendation computed"
        );

        MentorRecommendations {
            mentors,
            next_skills,
        }
    }

    /// Highest average-weight terms over the ranked users, minus the target's own words.
    ///
    /// Only terms with positive weight are candidates: a term none of the ranked users
    /// knows is never suggested, even when fewer than `candidate_terms` remain.
    fn next_skills(
        &self,
        vocabulary: &[String],
        user_rows: &[Vec<f64>],
        ranked: &[(usize, f64)],
        target_skill: &str,
    ) -> Vec<String> {
        if ranked.is_empty() {
            return Vec::new();
        }

        let mut average = vec![0.0; vocabulary.len()];
        for (i, _) in ranked {
            for (acc, weight) in average.iter_mut().zip(&user_rows[*i]) {
                *acc += weight;
            }
        }
        let count = ranked.len() as f64;

        let mut weighted: Vec<(usize, f64)> = average
            .into_iter()
            .map(|sum| sum / count)
            .enumerate()
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        // Stable: ties stay alphabetical
        weighted.sort_by(|a, b| by_weight_desc(&a.1, &b.1));

        let target_words: HashSet<String> = target_skill
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        weighted
            .into_iter()
            .take(self.candidate_terms)
            .map(|(i, _)| vocabulary[i].clone())
            .filter(|term| !target_words.contains(term))
            .take(self.max_next_skills)
            .collect()
    }
}
