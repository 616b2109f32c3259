//! # Recommend Module
//!
//! Skill-driven recommendations over the remote session catalog.
//!
//! ## Components
//! - `text`: normalization, slugs and fuzzy substring matching
//! - `session`: coercion of raw catalog records into normalized sessions
//! - `resolver`: scoring, filtering and ranking against a skills query
//! - `catalog`: the upstream catalog source (fail-open HTTP fetch)
//! - `mentors`: TF-IDF mentor ranking and next-skill suggestions

pub mod catalog;
pub mod mentors;
pub mod resolver;
pub mod session;
pub mod text;

pub use catalog::{CatalogSource, HttpCatalog};
pub use mentors::MentorRecommender;
pub use resolver::resolve;
pub use text::parse_skills;
