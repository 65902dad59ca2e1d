//! Demo verification scenarios.

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// AEP-001: Bounded ticking feed with well-formed sentences
    LiveFeed,

    /// AEP-002: Seeded memory-graph layout
    MemoryGraph,

    /// AEP-003: Orbit node field and star shell
    NeuralOrbit,

    /// AEP-004: Console reveal and load walk
    Console,

    /// AEP-005: Knowledge assistant cycle and typewriter
    Knowledge,

    /// AEP-006: Boot splash progress and stages
    Boot,

    /// AEP-007: Two full pages in lockstep, plus seed divergence
    Lockstep,

    /// AEP-008: Every engine together on one timeline
    FullPage,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::LiveFeed,
            ScenarioId::MemoryGraph,
            ScenarioId::NeuralOrbit,
            ScenarioId::Console,
            ScenarioId::Knowledge,
            ScenarioId::Boot,
            ScenarioId::Lockstep,
            ScenarioId::FullPage,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::LiveFeed => "live_feed",
            ScenarioId::MemoryGraph => "memory_graph",
            ScenarioId::NeuralOrbit => "neural_orbit",
            ScenarioId::Console => "console",
            ScenarioId::Knowledge => "knowledge",
            ScenarioId::Boot => "boot",
            ScenarioId::Lockstep => "lockstep",
            ScenarioId::FullPage => "full_page",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::LiveFeed => "Tick the feed, verify cap/order/sentence shape",
            ScenarioId::MemoryGraph => "Generate the graph, verify layout bounds and edges",
            ScenarioId::NeuralOrbit => "Generate orbit+stars, verify shells and connections",
            ScenarioId::Console => "Reveal the script, verify ordering and seeded load walk",
            ScenarioId::Knowledge => "Cycle canned queries, verify typewriter completion",
            ScenarioId::Boot => "Step the splash, verify stage thresholds",
            ScenarioId::Lockstep => "Replay two pages per seed, verify byte-equal transcripts",
            ScenarioId::FullPage => "Run every engine on one timeline for the full duration",
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live_feed" | "livefeed" | "feed" | "aep-001" => Ok(ScenarioId::LiveFeed),
            "memory_graph" | "memorygraph" | "graph" | "aep-002" => Ok(ScenarioId::MemoryGraph),
            "neural_orbit" | "neuralorbit" | "orbit" | "aep-003" => Ok(ScenarioId::NeuralOrbit),
            "console" | "aep-004" => Ok(ScenarioId::Console),
            "knowledge" | "assistant" | "aep-005" => Ok(ScenarioId::Knowledge),
            "boot" | "aep-006" => Ok(ScenarioId::Boot),
            "lockstep" | "aep-007" => Ok(ScenarioId::Lockstep),
            "full_page" | "fullpage" | "page" | "aep-008" => Ok(ScenarioId::FullPage),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for scenario in ScenarioId::all() {
            let parsed: ScenarioId = scenario.name().parse().unwrap();
            assert_eq!(parsed, scenario);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("chaos_storm".parse::<ScenarioId>().is_err());
    }
}
