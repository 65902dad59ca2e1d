//! Agent rosters.
//!
//! Static profiles of the three demo agents. Two views exist: the compact
//! status roster shown beside the console, and the richer "agents in
//! concert" marketing cards. Both are canned data with no behavior.

use serde::{Deserialize, Serialize};

/// Role of a demo agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    Builder,
    Reviewer,
    Ops,
}

impl AgentRole {
    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Builder => "Builder",
            AgentRole::Reviewer => "Reviewer",
            AgentRole::Ops => "Ops",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Displayed activity state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    Idle,
    Thinking,
    Working,
    Completed,
    Analyzing,
}

/// Direction arrow on a metric highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Stable,
    Down,
}

/// One row of the console-side status roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    pub role: AgentRole,
    pub state: AgentState,
    pub current_task: String,
    pub progress: u8,
    pub efficiency: f64,
    pub cpu_usage: u8,
    pub active_files: Vec<String>,
}

impl AgentStatus {
    /// Badge id shown under the agent name, e.g. `AGT-BUI-001`.
    pub fn badge(&self, index: usize) -> String {
        let prefix: String = self.role.name().chars().take(3).collect();
        format!("AGT-{}-{:03}", prefix.to_uppercase(), index + 1)
    }
}

/// The status roster beside the console terminal.
pub fn monitor_roster() -> Vec<AgentStatus> {
    vec![
        AgentStatus {
            role: AgentRole::Builder,
            state: AgentState::Working,
            current_task: "Implementing auth optimization".to_string(),
            progress: 67,
            efficiency: 94.7,
            cpu_usage: 34,
            active_files: vec!["TokenManager.ts".to_string(), "auth.config.ts".to_string()],
        },
        AgentStatus {
            role: AgentRole::Reviewer,
            state: AgentState::Analyzing,
            current_task: "Code quality assessment".to_string(),
            progress: 23,
            efficiency: 98.2,
            cpu_usage: 12,
            active_files: vec!["security-review.md".to_string()],
        },
        AgentStatus {
            role: AgentRole::Ops,
            state: AgentState::Idle,
            current_task: "Monitoring deployment pipeline".to_string(),
            progress: 100,
            efficiency: 99.1,
            cpu_usage: 3,
            active_files: vec![],
        },
    ]
}

/// A headline stat on a marketing card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricHighlight {
    pub label: String,
    pub value: String,
    pub trend: Trend,
}

/// One "agents in concert" marketing card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub role: AgentRole,
    pub description: String,
    pub activities: Vec<String>,
    pub highlights: Vec<MetricHighlight>,
}

fn highlight(label: &str, value: &str, trend: Trend) -> MetricHighlight {
    MetricHighlight {
        label: label.to_string(),
        value: value.to_string(),
        trend,
    }
}

/// The three marketing cards.
pub fn concert_roster() -> Vec<AgentProfile> {
    vec![
        AgentProfile {
            id: "builder".to_string(),
            name: "Agent Orion".to_string(),
            role: AgentRole::Builder,
            description: "Autonomous code generation and architecture decisions".to_string(),
            activities: vec![
                "Implementing user auth flow".to_string(),
                "Optimizing database queries".to_string(),
                "Refactoring legacy components".to_string(),
            ],
            highlights: vec![
                highlight("Code Quality", "A+", Trend::Up),
                highlight("Test Coverage", "94%", Trend::Up),
                highlight("Performance", "98ms", Trend::Up),
            ],
        },
        AgentProfile {
            id: "reviewer".to_string(),
            name: "Agent Nova".to_string(),
            role: AgentRole::Reviewer,
            description: "Intelligent code review and quality assurance".to_string(),
            activities: vec![
                "Reviewing security patterns".to_string(),
                "Validating API contracts".to_string(),
                "Checking accessibility compliance".to_string(),
            ],
            highlights: vec![
                highlight("Reviews", "47", Trend::Up),
                highlight("Issues Found", "12", Trend::Down),
                highlight("Approval Time", "3.2m", Trend::Down),
            ],
        },
        AgentProfile {
            id: "ops".to_string(),
            name: "Agent Vega".to_string(),
            role: AgentRole::Ops,
            description: "Infrastructure and deployment automation".to_string(),
            activities: vec![
                "Scaling Kubernetes pods".to_string(),
                "Monitoring error rates".to_string(),
                "Updating dependencies".to_string(),
            ],
            highlights: vec![
                highlight("Uptime", "99.9%", Trend::Stable),
                highlight("Deploy Time", "2.1m", Trend::Down),
                highlight("Incidents", "0", Trend::Stable),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rosters_cover_all_roles() {
        let monitor = monitor_roster();
        let concert = concert_roster();
        assert_eq!(monitor.len(), 3);
        assert_eq!(concert.len(), 3);

        for role in [AgentRole::Builder, AgentRole::Reviewer, AgentRole::Ops] {
            assert!(monitor.iter().any(|a| a.role == role));
            assert!(concert.iter().any(|a| a.role == role));
        }
    }

    #[test]
    fn test_badge_format() {
        let roster = monitor_roster();
        assert_eq!(roster[0].badge(0), "AGT-BUI-001");
        assert_eq!(roster[2].badge(2), "AGT-OPS-003");
    }

    #[test]
    fn test_cards_carry_three_activities_and_highlights() {
        for profile in concert_roster() {
            assert_eq!(profile.activities.len(), 3);
            assert_eq!(profile.highlights.len(), 3);
            assert!(profile.name.starts_with("Agent "));
        }
    }
}
