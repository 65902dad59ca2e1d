//! Boot sequence.
//!
//! The splash shown before the page mounts: a progress ring stepped one
//! percent per tick, with the status line advancing through four stages
//! at fixed thresholds.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of progress steps.
pub const BOOT_STEP_INTERVAL: Duration = Duration::from_millis(30);

/// Stage status lines, in order.
pub const BOOT_STAGES: [&str; 4] = [
    "Initializing Autonomous Engineering Platform...",
    "Loading neural networks...",
    "Connecting to memory graph...",
    "Boot sequence complete.",
];

/// Progress thresholds at which the stage line advances.
const STAGE_THRESHOLDS: [u8; 3] = [25, 50, 80];

/// Snapshot of the boot splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootProgress {
    /// 0 to 100
    pub progress: u8,

    /// Index into [`BOOT_STAGES`]
    pub stage: usize,
}

/// The boot splash state machine.
#[derive(Debug, Clone, Default)]
pub struct BootSequence {
    progress: u8,
}

impl BootSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one tick; progress saturates at 100.
    pub fn step(&mut self) -> BootProgress {
        if self.progress < 100 {
            self.progress += 1;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> BootProgress {
        BootProgress {
            progress: self.progress,
            stage: self.stage_index(),
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn stage_index(&self) -> usize {
        STAGE_THRESHOLDS
            .iter()
            .filter(|&&threshold| self.progress >= threshold)
            .count()
    }

    pub fn stage_message(&self) -> &'static str {
        BOOT_STAGES[self.stage_index()]
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }
}
