//! Rule tables for the general assistant and the mentor assistant.

use std::sync::LazyLock;

use super::matcher::{IntentMatcher, Predicate, Reply};

const VIDEO_WORDS: &[&str] = &["video", "videos", "session", "sessions", "class", "workshop"];

const RECOMMEND_WORDS: &[&str] = &[
    "recommend",
    "suggest",
    "find",
    "see",
    "view",
    "watch",
    "available",
    "learn",
    "study",
    "show",
];

pub const ASSISTANT_FALLBACK: &str =
    "I’m here to help with Peerverse topics — try asking about sessions, badges, or SkillPoints. 😊";

pub const MENTOR_FALLBACK: &str =
    "I can assist with mentoring prompts, feedback rubrics, or personalized learning paths. Ask away!";

pub const BROWSE_SESSIONS_REPLY: &str = "Explore sessions under the Sessions tab — e.g., *Python_Basics*, *React Workshop*, *Machine Learning Fundamentals*. For quick learning, try Microsessions (≤60 mins). 🎥";

fn greeting() -> Predicate {
    Predicate::words(&["hi", "hello", "hey"])
}

pub static ASSISTANT: LazyLock<IntentMatcher> = LazyLock::new(|| {
    IntentMatcher::new(ASSISTANT_FALLBACK)
        .rule(
            "greeting",
            greeting(),
            Reply::Fixed("👋 Hey there! I’m the Peerverse Assistant — your learning companion. Ask me about sessions, SkillPoints, badges, or hosting!"),
        )
        .rule(
            "python_sessions",
            Predicate::All(vec![
                Predicate::HasAny(&["python"]),
                Predicate::HasAny(VIDEO_WORDS),
            ]),
            Reply::Fixed("You can find Python sessions like *Python_Basics* under Sessions. Great pick to get started! 🐍"),
        )
        .rule(
            "browse_sessions",
            Predicate::All(vec![
                Predicate::HasAny(RECOMMEND_WORDS),
                Predicate::HasAny(VIDEO_WORDS),
            ]),
            Reply::Fixed(BROWSE_SESSIONS_REPLY),
        )
        .rule(
            "badges",
            Predicate::HasAny(&["badge", "badges"]),
            Reply::RoleAware {
                base: "You can earn badges like Skill Explorer, Consistent Learner, First Share, and Top Performer. Check the Badges & Rewards page.",
                mentor: "As a mentor, hosting sessions helps you earn badges!",
                learner: "As a learner, attending sessions grows your badge collection!",
            },
        )
        .rule(
            "skill_points",
            Predicate::HasAny(&["skillpoints", "skill points", "points"]),
            Reply::Fixed("Earn SkillPoints by attending sessions, hosting, completing microsessions, and giving feedback. They track progress and unlock badges. 🚀"),
        )
        .rule(
            "hosting",
            Predicate::HasAny(&["mentor", "teach", "host"]),
            Reply::Fixed("Awesome! Go to Dashboard → Share a Session, add your topic and tags. Once approved, you’ll earn SkillPoints for teaching!"),
        )
        .rule(
            "explore",
            Predicate::HasAny(&["learn", "session", "sessions", "explore"]),
            Reply::Fixed("You can explore all sessions on the Sessions page. For short ones, check Microsessions (≤60 mins). Keep learning!"),
        )
        .rule(
            "about",
            Predicate::Any(vec![
                Predicate::HasAny(&["peerverse", "about"]),
                Predicate::StartsWith(&["what is", "tell me"]),
            ]),
            Reply::Fixed("Peerverse is a peer-led learning platform to learn, teach, and earn SkillPoints. Explore sessions, host your own, and grow with community support. 🌱"),
        )
        .rule(
            "microsessions",
            Predicate::HasAny(&["micro", "short", "small", "quick"]),
            Reply::Fixed("Microsessions are short peer-led sessions (≤60 mins). Find them via the Microsessions section — perfect for quick learning boosts! ⚡"),
        )
        .rule(
            "progress",
            Predicate::HasAny(&["attend", "progress", "complete", "finish"]),
            Reply::Fixed("Track your journey in Dashboard — see completed sessions, badges, and total SkillPoints. 📊"),
        )
        .rule(
            "community",
            Predicate::HasAny(&["feedback", "help", "review", "community"]),
            Reply::Fixed("Give feedback after sessions or help peers in discussions. Consistent participation earns the Community Helper badge! 🤝"),
        )
        .rule(
            "troubleshooting",
            Predicate::HasAny(&["error", "not working", "can't", "cant", "issue", "problem", "404"]),
            Reply::Fixed("Try refreshing or re-login. If it continues, check your connection or report it via the Feedback form. 🧰"),
        )
        .rule(
            "navigation",
            Predicate::HasAny(&["home", "dashboard", "explore", "gamification", "wishlist", "microsessions"]),
            Reply::Fixed("Use the top Navbar to go to Home, Sessions, Dashboard, or Badges & Rewards anytime. You’ve got this!"),
        )
        // Shadowed by navigation for "wishlist" itself
        .rule(
            "wishlist",
            Predicate::HasAny(&["wishlist", "favorite", "saved"]),
            Reply::Fixed("Click the ❤️ next to a session to save it. View all saved items via the Wishlist heart in the Navbar."),
        )
        .exact(
            "what is peerverse",
            "Peerverse is a platform for peer-led micro-learning sessions. You can learn, teach, and earn SkillPoints!",
        )
        .exact(
            "how do i earn skillpoints",
            "You earn SkillPoints by attending sessions, completing challenges, and engaging with the community.",
        )
        .exact(
            "how do i become a mentor",
            "To become a mentor, host your first session under 'Share a Session' — once approved, you’ll start earning Mentor Points.",
        )
        .exact(
            "can i watch sessions later",
            "Yes! You can revisit completed sessions from your Dashboard recordings section.",
        )
        .exact(
            "what are badges",
            "Badges are rewards you earn for achievements like consistent learning, sharing sessions, or community contributions.",
        )
        .exact(
            "who created peerverse",
            "Peerverse was created by a team passionate about collaborative learning and knowledge sharing.",
        )
        .exact(
            "how does wishlist work",
            "Click the heart icon to add sessions to your wishlist. You can view them anytime from the wishlist button in the navbar.",
        )
});

pub static MENTOR: LazyLock<IntentMatcher> = LazyLock::new(|| {
    IntentMatcher::new(MENTOR_FALLBACK)
        .rule(
            "greeting",
            greeting(),
            Reply::Fixed("Hi mentor! How can I help with recommendations or teaching today?"),
        )
        .rule(
            "recommend",
            Predicate::HasAny(&["recommend", "suggest"]),
            Reply::Fixed("Tell me the learner's target skills and level; I'll propose topics, videos, and practice tasks."),
        )
        .rule(
            "plan",
            Predicate::HasAny(&["plan", "curriculum", "outline"]),
            Reply::Fixed("Start with goals → prerequisites → core topics → practice → reflection. I can draft a weekly plan if you share time available."),
        )
        .rule(
            "resources",
            Predicate::HasAny(&["video", "videos", "resources"]),
            Reply::Fixed("Prefer short, focused videos (≤15m). For deep dives, combine docs + tutorial + practice repo. I can generate a list based on skills."),
        )
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::matcher::{ChatContext, MatchSource};

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = ASSISTANT.rule_names().collect();
        assert_eq!(
            names,
            vec![
                "greeting",
                "python_sessions",
                "browse_sessions",
                "badges",
                "skill_points",
                "hosting",
                "explore",
                "about",
                "microsessions",
                "progress",
                "community",
                "troubleshooting",
                "navigation",
                "wishlist",
            ]
        );

        let names: Vec<&str> = MENTOR.rule_names().collect();
        assert_eq!(names, vec!["greeting", "recommend", "plan", "resources"]);
    }

    #[test]
    fn test_python_beats_browse() {
        let result = ASSISTANT.evaluate("Recommend python videos", &ChatContext::default());
        assert_eq!(result.source, MatchSource::Rule("python_sessions"));
    }

    #[test]
    fn test_navigation_shadows_wishlist_keyword() {
        let ctx = ChatContext::default();
        assert_eq!(
            ASSISTANT.evaluate("open my wishlist", &ctx).source,
            MatchSource::Rule("navigation")
        );
        assert_eq!(
            ASSISTANT.evaluate("my favorite things", &ctx).source,
            MatchSource::Rule("wishlist")
        );
    }

    #[test]
    fn test_mentor_fallback() {
        assert_eq!(MENTOR.classify("asdkjasd", &ChatContext::default()), MENTOR_FALLBACK);
    }
}
