//! Assistant Tests
//!
//! Both chat personas driven through their public surface: rule precedence, role-aware
//! replies and fallbacks.

use crate::assistant::matcher::MatchSource;
use crate::assistant::personas::{ASSISTANT_FALLBACK, BROWSE_SESSIONS_REPLY, MENTOR_FALLBACK};
use crate::assistant::{ChatContext, Persona};

fn rule_for(persona: Persona, input: &str) -> MatchSource {
    persona.respond(input, &ChatContext::default()).source
}

#[cfg(test)]
mod general_assistant_tests {
    use super::*;

    #[test]
    fn test_browse_request_ignores_role() {
        for role in [None, Some("mentor"), Some("learner"), Some("LEARNER")] {
            let context = ChatContext::from_hint(role);
            let reply = Persona::Assistant
                .matcher()
                .classify("Can you recommend some videos?", &context);
            assert_eq!(reply, BROWSE_SESSIONS_REPLY, "role {:?}", role);
        }
    }

    #[test]
    fn test_gibberish_gets_default_message() {
        let result = Persona::Assistant.respond("asdkjasd", &ChatContext::default());
        assert_eq!(result.reply, ASSISTANT_FALLBACK);
        assert_eq!(result.source, MatchSource::Fallback);
    }

    #[test]
    fn test_greetings_need_whole_words() {
        for greeting in ["Hello!", "hey there", "HI", "  hi  ", "hié"] {
            assert_eq!(
                rule_for(Persona::Assistant, greeting),
                MatchSource::Rule("greeting"),
                "Expected greeting for '{}'",
                greeting
            );
        }
        assert_ne!(rule_for(Persona::Assistant, "which one"), MatchSource::Rule("greeting"));
    }

    #[test]
    fn test_badges_reply_depends_on_role() {
        let base = "You can earn badges like Skill Explorer, Consistent Learner, First Share, and Top Performer. Check the Badges & Rewards page.";

        let anonymous = Persona::Assistant
            .matcher()
            .classify("Tell me about badges", &ChatContext::default());
        assert_eq!(anonymous, base);

        let mentor = Persona::Assistant
            .matcher()
            .classify("Tell me about badges", &ChatContext::from_hint(Some("Mentor")));
        assert_eq!(
            mentor,
            format!("{} As a mentor, hosting sessions helps you earn badges!", base)
        );

        let learner = Persona::Assistant
            .matcher()
            .classify("badges?", &ChatContext::from_hint(Some("learner")));
        assert!(learner.ends_with("As a learner, attending sessions grows your badge collection!"));
    }

    #[test]
    fn test_rule_precedence() {
        let cases = [
            ("Show me python workshops", "python_sessions"),
            ("How many skill points do I have?", "skill_points"),
            ("I want to teach", "hosting"),
            ("What is micro learning?", "explore"),
            ("quick tips", "microsessions"),
            ("How do I track my progress", "progress"),
            ("The page shows a 404", "troubleshooting"),
            ("go to dashboard", "navigation"),
            ("my saved items", "wishlist"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                rule_for(Persona::Assistant, input),
                MatchSource::Rule(expected),
                "Unexpected rule for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_faq_phrases_are_answered_by_keyword_rules() {
        // Keyword rules run before the exact table and catch every stock phrase
        let cases = [
            ("what is peerverse", "about"),
            ("how do i earn skillpoints", "skill_points"),
            ("how do i become a mentor", "hosting"),
            ("can i watch sessions later", "browse_sessions"),
            ("what are badges", "badges"),
            ("who created peerverse", "about"),
            ("how does wishlist work", "navigation"),
        ];

        for (input, expected) in cases {
            assert_eq!(rule_for(Persona::Assistant, input), MatchSource::Rule(expected));
        }
    }
}

#[cfg(test)]
mod mentor_assistant_tests {
    use super::*;

    #[test]
    fn test_mentor_rules() {
        let cases = [
            ("hello", "greeting"),
            ("Can you suggest a curriculum?", "recommend"),
            ("outline for week 1", "plan"),
            ("any good resources?", "resources"),
            ("hi, any videos?", "greeting"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                rule_for(Persona::Mentor, input),
                MatchSource::Rule(expected),
                "Unexpected rule for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_mentor_has_no_exact_table() {
        let result = Persona::Mentor.respond("what is peerverse", &ChatContext::default());
        assert_eq!(result.reply, MENTOR_FALLBACK);
        assert_eq!(result.source, MatchSource::Fallback);
    }

    #[test]
    fn test_personas_are_independent() {
        let input = "recommend a plan";
        assert_eq!(rule_for(Persona::Mentor, input), MatchSource::Rule("recommend"));
        assert_eq!(rule_for(Persona::Assistant, input), MatchSource::Fallback);
    }
}
