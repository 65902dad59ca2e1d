//! Agent console session.
//!
//! The "Neural Command Center" terminal: a canned script of agent log
//! entries revealed one at a time on a fixed cadence, plus a system-load
//! readout that drifts with a small seeded random walk. Pausing stops the
//! reveal; the script never loops.

use crate::agents::AgentRole;
use crate::sequence::SequenceGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of log reveals.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(2_500);

/// Cadence of system-load updates.
pub const LOAD_INTERVAL: Duration = Duration::from_millis(1_000);

/// Entries visible before the first reveal tick.
pub const INITIAL_VISIBLE: usize = 2;

/// System load shown at session start, in percent.
pub const INITIAL_SYSTEM_LOAD: f64 = 23.7;

/// Status badge of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Running,
    Completed,
    Error,
    Analyzing,
}

/// Severity dot of a console entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One line of the console script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleLog {
    pub id: String,
    pub timestamp: String,
    pub agent: AgentRole,
    pub action: String,
    pub status: LogStatus,
    pub details: Option<String>,
    pub code: Option<String>,
    pub duration_secs: Option<f64>,
    pub file: Option<String>,
    pub severity: Option<Severity>,
}

/// The canned console script, in reveal order.
pub fn boot_script() -> Vec<ConsoleLog> {
    vec![
        ConsoleLog {
            id: "1".to_string(),
            timestamp: "14:23:01.247".to_string(),
            agent: AgentRole::Builder,
            action: "Deep scanning authentication patterns".to_string(),
            status: LogStatus::Completed,
            details: Some("Analyzed 1,247 auth implementations across codebase".to_string()),
            code: None,
            duration_secs: Some(1.2),
            file: Some("auth/patterns.analysis".to_string()),
            severity: Some(Severity::Medium),
        },
        ConsoleLog {
            id: "2".to_string(),
            timestamp: "14:23:02.891".to_string(),
            agent: AgentRole::Builder,
            action: "Vector embedding security contexts".to_string(),
            status: LogStatus::Completed,
            details: Some("Generated 847 security context embeddings".to_string()),
            code: None,
            duration_secs: Some(0.6),
            file: Some("security/context.vectors".to_string()),
            severity: Some(Severity::High),
        },
        ConsoleLog {
            id: "3".to_string(),
            timestamp: "14:23:03.445".to_string(),
            agent: AgentRole::Builder,
            action: "Synthesizing optimal implementation strategy".to_string(),
            status: LogStatus::Analyzing,
            details: Some("JWT refresh optimization with 99.7% efficiency target".to_string()),
            code: None,
            duration_secs: None,
            file: Some("strategy/auth-optimization.plan".to_string()),
            severity: Some(Severity::Critical),
        },
        ConsoleLog {
            id: "4".to_string(),
            timestamp: "14:23:04.012".to_string(),
            agent: AgentRole::Builder,
            action: "Autonomous code generation initiated".to_string(),
            status: LogStatus::Running,
            details: None,
            code: Some(
                r#"// AEP Generated: Ultra-optimized Token Manager
class TokenManager {
  private static instance: TokenManager;
  private refreshPromise: Promise<string> | null = null;
  private tokenCache = new Map<string, { token: string; expiry: number }>();

  async getValidToken(context?: AuthContext): Promise<string> {
    const cacheKey = this.generateCacheKey(context);
    const cached = this.tokenCache.get(cacheKey);

    if (cached && !this.isExpired(cached.token, cached.expiry)) {
      return cached.token;
    }

    return this.acquireToken(context, cacheKey);
  }
}"#
                .to_string(),
            ),
            duration_secs: None,
            file: Some("src/auth/TokenManager.ts".to_string()),
            severity: Some(Severity::Critical),
        },
    ]
}

/// A running console session.
///
/// Owned by one driver; reveal and load ticks are applied synchronously
/// from the host's timers.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    script: Vec<ConsoleLog>,
    revealed: usize,
    playing: bool,
    load: f64,
    load_walk: SequenceGenerator,
}

impl ConsoleSession {
    /// Creates a session over the canned script.
    ///
    /// The load walk is seeded explicitly so recorded sessions replay the
    /// same drift.
    pub fn new(load_seed: i64) -> Self {
        let script = boot_script();
        Self {
            revealed: INITIAL_VISIBLE.min(script.len()),
            script,
            playing: true,
            load: INITIAL_SYSTEM_LOAD,
            load_walk: SequenceGenerator::new(load_seed),
        }
    }

    /// Reveals the next entry if playing and the script has more.
    pub fn reveal_next(&mut self) -> Option<&ConsoleLog> {
        if !self.playing || self.revealed >= self.script.len() {
            return None;
        }
        self.revealed += 1;
        Some(&self.script[self.revealed - 1])
    }

    /// Applies one load-walk step and returns the new load percentage.
    pub fn step_load(&mut self) -> f64 {
        self.load += (self.load_walk.next_f64() - 0.5) * 2.0;
        self.load
    }

    /// Entries revealed so far, in script order.
    pub fn visible(&self) -> &[ConsoleLog] {
        &self.script[..self.revealed]
    }

    pub fn script_len(&self) -> usize {
        self.script.len()
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.script.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn system_load(&self) -> f64 {
        self.load
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_reveals_in_order_and_stops() {
        let mut session = ConsoleSession::new(1);
        assert_eq!(session.visible().len(), INITIAL_VISIBLE);

        let mut ids = Vec::new();
        while let Some(log) = session.reveal_next() {
            ids.push(log.id.clone());
        }
        assert_eq!(ids, vec!["3", "4"]);
        assert!(session.is_complete());
        assert!(session.reveal_next().is_none());
    }

    #[test]
    fn test_pausing_blocks_reveals() {
        let mut session = ConsoleSession::new(1);
        session.set_playing(false);
        assert!(session.reveal_next().is_none());

        session.set_playing(true);
        assert!(session.reveal_next().is_some());
    }

    #[test]
    fn test_load_walk_is_seeded() {
        let mut a = ConsoleSession::new(99);
        let mut b = ConsoleSession::new(99);
        for _ in 0..50 {
            assert_eq!(a.step_load(), b.step_load());
        }

        let mut c = ConsoleSession::new(100);
        let mut d = ConsoleSession::new(99);
        assert_ne!(c.step_load(), d.step_load());
    }

    #[test]
    fn test_load_step_is_bounded() {
        let mut session = ConsoleSession::new(7);
        let mut previous = session.system_load();
        for _ in 0..100 {
            let load = session.step_load();
            assert!((load - previous).abs() <= 1.0);
            previous = load;
        }
    }

    #[test]
    fn test_script_content_shape() {
        let script = boot_script();
        assert_eq!(script.len(), 4);
        assert!(script.iter().all(|l| l.agent == AgentRole::Builder));
        assert!(script[3].code.as_deref().unwrap().contains("TokenManager"));
    }
}
