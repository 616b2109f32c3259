//! Test Module
//!
//! Cross-module tests for the Peerverse core service.
//!
//! ## Test Categories
//! - `recommend_tests`: catalog fetch through ranking, end to end
//! - `assistant_tests`: both chat personas and their rule precedence
//! - `server_tests`: HTTP routes, validation and rate limiting

pub mod assistant_tests;
pub mod recommend_tests;
