//! Ordered keyword rules for canned chat replies.
//!
//! Input is trimmed and lower-cased, then rules are tried in declaration order and the
//! first match wins. Keyword sets overlap between rules, so order decides the reply.
//! Unmatched input is looked up in an exact-phrase table, then gets the fallback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Test applied to normalized input
pub enum Predicate {
    /// Regex match, typically word-bounded
    Pattern(Regex),
    /// Input contains any of the keywords as a substring
    HasAny(&'static [&'static str]),
    /// Input starts with any of the prefixes
    StartsWith(&'static [&'static str]),
    /// Every inner predicate holds
    All(Vec<Predicate>),
    /// At least one inner predicate holds
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Whole-word match of any alternative. Word boundaries are ASCII-only, so a
    /// following accented letter still ends the word.
    pub fn words(alternatives: &[&str]) -> Self {
        let escaped: Vec<String> = alternatives.iter().map(|w| regex::escape(w)).collect();
        let pattern = format!(r"(?-u:\b)(?:{})(?-u:\b)", escaped.join("|"));
        // Escaped alternatives always form a valid pattern
        Predicate::Pattern(Regex::new(&pattern).expect("Invalid regex: escaped word list"))
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            Predicate::Pattern(regex) => regex.is_match(input),
            Predicate::HasAny(keywords) => keywords.iter().any(|k| input.contains(k)),
            Predicate::StartsWith(prefixes) => prefixes.iter().any(|p| input.starts_with(p)),
            Predicate::All(inner) => inner.iter().all(|p| p.matches(input)),
            Predicate::Any(inner) => inner.iter().any(|p| p.matches(input)),
        }
    }
}

/// Role hint held in the client profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Learner,
}

impl Role {
    /// Case-insensitive. Unknown roles are treated as no role.
    pub fn from_hint(hint: Option<&str>) -> Option<Role> {
        match hint.map(|h| h.trim().to_lowercase()).as_deref() {
            Some("mentor") => Some(Role::Mentor),
            Some("learner") => Some(Role::Learner),
            _ => None,
        }
    }
}

/// Caller-supplied context for one classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatContext {
    pub role: Option<Role>,
}

impl ChatContext {
    pub fn from_hint(role_hint: Option<&str>) -> Self {
        Self {
            role: Role::from_hint(role_hint),
        }
    }
}

/// Reply produced by a rule
pub enum Reply {
    Fixed(&'static str),
    /// Base text followed by a sentence for the caller's role, if known
    RoleAware {
        base: &'static str,
        mentor: &'static str,
        learner: &'static str,
    },
}

impl Reply {
    fn render(&self, context: &ChatContext) -> String {
        match self {
            Reply::Fixed(text) => text.to_string(),
            Reply::RoleAware {
                base,
                mentor,
                learner,
            } => match context.role {
                Some(Role::Mentor) => format!("{} {}", base, mentor),
                Some(Role::Learner) => format!("{} {}", base, learner),
                None => base.to_string(),
            },
        }
    }
}

pub struct IntentRule {
    pub name: &'static str,
    pub predicate: Predicate,
    pub reply: Reply,
}

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Rule(&'static str),
    Exact,
    Fallback,
}

impl MatchSource {
    pub fn label(&self) -> &'static str {
        match self {
            MatchSource::Rule(name) => name,
            MatchSource::Exact => "exact",
            MatchSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub reply: String,
    pub source: MatchSource,
}

/// Rule list, exact-phrase table and fallback forming one assistant persona
pub struct IntentMatcher {
    rules: Vec<IntentRule>,
    exact: HashMap<String, &'static str>,
    fallback: &'static str,
}

impl IntentMatcher {
    pub fn new(fallback: &'static str) -> Self {
        Self {
            rules: Vec::new(),
            exact: HashMap::new(),
            fallback,
        }
    }

    /// Appends a rule; it is tried after every rule added before it.
    pub fn rule(mut self, name: &'static str, predicate: Predicate, reply: Reply) -> Self {
        self.rules.push(IntentRule {
            name,
            predicate,
            reply,
        });
        self
    }

    pub fn exact(mut self, phrase: &str, answer: &'static str) -> Self {
        self.exact.insert(normalize(phrase), answer);
        self
    }

    #[cfg(test)]
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Reply text for `input`. Total: every input gets a reply.
    ///
    /// Reply-only form of [`IntentMatcher::evaluate`]; the HTTP surface also reports the
    /// matching rule and goes through `evaluate`.
    #[allow(dead_code)]
    pub fn classify(&self, input: &str, context: &ChatContext) -> String {
        self.evaluate(input, context).reply
    }

    pub fn evaluate(&self, input: &str, context: &ChatContext) -> MatchResult {
        let normalized = normalize(input);

        if let Some(rule) = self.rules.iter().find(|r| r.predicate.matches(&normalized)) {
            return MatchResult {
                reply: rule.reply.render(context),
                source: MatchSource::Rule(rule.name),
            };
        }

        if let Some(answer) = self.exact.get(&normalized) {
            return MatchResult {
                reply: answer.to_string(),
                source: MatchSource::Exact,
            };
        }

        MatchResult {
            reply: self.fallback.to_string(),
            source: MatchSource::Fallback,
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
