//! System metrics board.
//!
//! The six headline stats of the command center. Each refresh nudges the
//! values upward (counters) or around their ceiling (percentages) with
//! draws from an explicit seeded generator, so a recorded dashboard
//! session replays identically.

use crate::sequence::SequenceGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of board refreshes.
pub const METRICS_INTERVAL: Duration = Duration::from_millis(3_000);

/// One stat tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetric {
    pub label: String,
    pub value: f64,
    pub unit: String,
    /// Percent change badge, signed
    pub change: f64,
}

impl SystemMetric {
    fn new(label: &str, value: f64, unit: &str, change: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.to_string(),
            change,
        }
    }

    /// Percent-unit tiles are clamped to 100 and jittered; counter tiles
    /// only grow.
    pub fn is_percent(&self) -> bool {
        self.unit == "%"
    }
}

/// The six tiles at their launch values.
pub fn baseline() -> Vec<SystemMetric> {
    vec![
        SystemMetric::new("Code Generated", 15_847.0, "lines", 12.3),
        SystemMetric::new("Tests Passed", 2_847.0, "cases", 5.7),
        SystemMetric::new("Issues Resolved", 127.0, "total", 23.1),
        SystemMetric::new("Deployments", 34.0, "successful", 8.9),
        SystemMetric::new("Security Scans", 1_205.0, "completed", 15.2),
        SystemMetric::new("Performance Score", 98.7, "%", 2.1),
    ]
}

/// The refreshing metrics board.
#[derive(Debug, Clone)]
pub struct MetricsBoard {
    metrics: Vec<SystemMetric>,
    walk: SequenceGenerator,
}

impl MetricsBoard {
    /// Creates a board at the baseline, with a seeded jitter walk.
    pub fn new(seed: i64) -> Self {
        Self {
            metrics: baseline(),
            walk: SequenceGenerator::new(seed),
        }
    }

    /// Applies one refresh: two draws per tile, value then change.
    pub fn step(&mut self) {
        for metric in &mut self.metrics {
            if metric.is_percent() {
                metric.value = (metric.value + (self.walk.next_f64() - 0.5) * 0.5).min(100.0);
            } else {
                metric.value += (self.walk.next_f64() * 5.0).floor();
            }
            metric.change = (self.walk.next_f64() - 0.5) * 10.0;
        }
    }

    pub fn metrics(&self) -> &[SystemMetric] {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_shape() {
        let tiles = baseline();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles.iter().filter(|m| m.is_percent()).count(), 1);
    }

    #[test]
    fn test_counters_never_shrink_and_percent_stays_capped() {
        let mut board = MetricsBoard::new(2_025);
        let start = board.metrics().to_vec();

        for _ in 0..200 {
            board.step();
            for (tile, initial) in board.metrics().iter().zip(&start) {
                if tile.is_percent() {
                    assert!(tile.value <= 100.0);
                } else {
                    assert!(tile.value >= initial.value);
                }
                assert!(tile.change.abs() <= 5.0);
            }
        }
    }

    #[test]
    fn test_refresh_walk_is_seeded() {
        let mut a = MetricsBoard::new(11);
        let mut b = MetricsBoard::new(11);
        for _ in 0..20 {
            a.step();
            b.step();
        }
        assert_eq!(a.metrics(), b.metrics());

        let mut c = MetricsBoard::new(12);
        c.step();
        a.step();
        assert_ne!(a.metrics()[5].change, c.metrics()[5].change);
    }
}
