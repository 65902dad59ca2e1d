//! Knowledge assistant demo.
//!
//! The canned Q&A showcase: a fixed set of queries with sourced answers,
//! cycled with wrap-around, each answer revealed with a typewriter effect
//! one character per tick.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of typewriter ticks.
pub const TYPE_INTERVAL: Duration = Duration::from_millis(30);

/// Pause before typing starts on a fresh query.
pub const TYPE_START_DELAY: Duration = Duration::from_millis(500);

/// Origin system of a cited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Slack,
    Jira,
    Confluence,
    Teams,
    Zoom,
    Github,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Slack => "Slack",
            SourceKind::Jira => "Jira",
            SourceKind::Confluence => "Confluence",
            SourceKind::Teams => "Teams",
            SourceKind::Zoom => "Zoom",
            SourceKind::Github => "Github",
        }
    }
}

/// A cited source card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub date: String,
}

/// One canned query with its answer and citations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeQuery {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
    pub related_tasks: Vec<String>,
}

fn source(kind: SourceKind, title: &str, url: &str, snippet: &str, date: &str) -> SourceRef {
    SourceRef {
        kind,
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        date: date.to_string(),
    }
}

/// The canned query set, in cycle order.
pub fn canned_queries() -> Vec<KnowledgeQuery> {
    vec![
        KnowledgeQuery {
            id: "1".to_string(),
            question: "What is the dev environment link?".to_string(),
            answer: "The development environment is hosted at https://dev-api.company.com:8443. \
                     Based on the latest infrastructure update, the environment was migrated to \
                     AWS ECS with auto-scaling enabled."
                .to_string(),
            sources: vec![
                source(
                    SourceKind::Confluence,
                    "Development Environment Setup Guide",
                    "https://company.atlassian.net/wiki/dev-env-setup",
                    "Dev environment URL: https://dev-api.company.com:8443 (Updated: Nov 2024)",
                    "2024-11-15",
                ),
                source(
                    SourceKind::Slack,
                    "#infrastructure-updates",
                    "https://company.slack.com/archives/C123456/p1699123456",
                    "Dev environment migration complete! New URL is live and load-balanced.",
                    "2024-11-10",
                ),
                source(
                    SourceKind::Jira,
                    "INFRA-2847: Migrate dev environment to ECS",
                    "https://company.atlassian.net/browse/INFRA-2847",
                    "Migration completed successfully. All services responding on new endpoint.",
                    "2024-11-08",
                ),
            ],
            related_tasks: vec![],
        },
        KnowledgeQuery {
            id: "2".to_string(),
            question: "What are the useful resources for implementing JWT authentication?"
                .to_string(),
            answer: "Based on your current task AUTH-1234, here are the most relevant resources \
                     for JWT implementation in our stack. The team has established patterns using \
                     our custom TokenManager class with Redis caching."
                .to_string(),
            sources: vec![
                source(
                    SourceKind::Confluence,
                    "Authentication Architecture Guide",
                    "https://company.atlassian.net/wiki/auth-guide",
                    "JWT implementation with Redis caching and refresh token rotation strategy...",
                    "2024-10-20",
                ),
                source(
                    SourceKind::Github,
                    "auth/TokenManager.ts - Reference Implementation",
                    "https://github.com/company/api/blob/main/src/auth/TokenManager.ts",
                    "class TokenManager { private static instance; async getValidToken()...",
                    "2024-11-01",
                ),
                source(
                    SourceKind::Zoom,
                    "Architecture Review: Auth Strategy",
                    "https://zoom.us/rec/share/auth-review-oct2024",
                    "Discussed JWT implementation patterns, decided on Redis for token storage...",
                    "2024-10-18",
                ),
                source(
                    SourceKind::Teams,
                    "Security Best Practices - Auth Team",
                    "https://teams.microsoft.com/l/message/auth-team/123456",
                    "Remember to implement proper token rotation and use httpOnly cookies...",
                    "2024-10-25",
                ),
            ],
            related_tasks: vec![
                "AUTH-1234: Implement JWT refresh logic".to_string(),
                "AUTH-1235: Add token rotation".to_string(),
                "SEC-567: Security audit for auth flow".to_string(),
            ],
        },
    ]
}

/// The interactive assistant demo: current query plus typewriter cursor.
#[derive(Debug, Clone)]
pub struct AssistantDemo {
    queries: Vec<KnowledgeQuery>,
    current: usize,
    typed_chars: usize,
}

impl AssistantDemo {
    pub fn new() -> Self {
        Self {
            queries: canned_queries(),
            current: 0,
            typed_chars: 0,
        }
    }

    /// The query currently on screen.
    pub fn query(&self) -> &KnowledgeQuery {
        &self.queries[self.current]
    }

    /// Advances to the next query with wrap-around and resets the cursor.
    pub fn next_query(&mut self) -> &KnowledgeQuery {
        self.current = (self.current + 1) % self.queries.len();
        self.typed_chars = 0;
        self.query()
    }

    /// Applies one typewriter tick; returns false once the answer is
    /// fully revealed.
    pub fn type_tick(&mut self) -> bool {
        let total = self.query().answer.chars().count();
        if self.typed_chars < total {
            self.typed_chars += 1;
            true
        } else {
            false
        }
    }

    /// The revealed answer prefix.
    pub fn typed_answer(&self) -> String {
        self.query().answer.chars().take(self.typed_chars).collect()
    }

    pub fn is_typing(&self) -> bool {
        self.typed_chars < self.query().answer.chars().count()
    }

    pub fn query_count(&self) -> usize {
        self.queries.len()
    }
}

impl Default for AssistantDemo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_queries_are_sourced() {
        for query in canned_queries() {
            assert!(!query.question.is_empty());
            assert!(!query.answer.is_empty());
            assert!(!query.sources.is_empty());
            for source in &query.sources {
                assert!(source.url.starts_with("https://"));
            }
        }
    }

    #[test]
    fn test_typewriter_reveals_full_answer() {
        let mut demo = AssistantDemo::new();
        let answer = demo.query().answer.clone();

        let mut ticks = 0;
        while demo.type_tick() {
            ticks += 1;
        }
        assert_eq!(ticks, answer.chars().count());
        assert_eq!(demo.typed_answer(), answer);
        assert!(!demo.is_typing());
    }

    #[test]
    fn test_cycle_wraps_and_resets_cursor() {
        let mut demo = AssistantDemo::new();
        let count = demo.query_count();

        demo.type_tick();
        let second = demo.next_query().id.clone();
        assert_eq!(second, "2");
        assert_eq!(demo.typed_answer(), "");

        for _ in 1..count {
            demo.next_query();
        }
        assert_eq!(demo.query().id, "1");
    }

    #[test]
    fn test_prefix_grows_monotonically() {
        let mut demo = AssistantDemo::new();
        let mut previous = String::new();
        for _ in 0..40 {
            demo.type_tick();
            let typed = demo.typed_answer();
            assert!(typed.starts_with(&previous));
            previous = typed;
        }
    }
}
