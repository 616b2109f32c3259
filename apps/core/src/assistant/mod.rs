pub mod matcher;
pub mod personas;

pub use matcher::{ChatContext, IntentMatcher, MatchResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which assistant answers a chat message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// General Peerverse help widget
    #[default]
    Assistant,
    /// Teaching assistant shown to mentors
    Mentor,
}

impl Persona {
    pub fn matcher(&self) -> &'static IntentMatcher {
        match self {
            Persona::Assistant => &personas::ASSISTANT,
            Persona::Mentor => &personas::MENTOR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Assistant => "assistant",
            Persona::Mentor => "mentor",
        }
    }

    pub fn respond(&self, message: &str, context: &ChatContext) -> MatchResult {
        self.matcher().evaluate(message, context)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
