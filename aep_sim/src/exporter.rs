//! JSON exporter for demo replays.
//!
//! Exports page frames as JSON for downstream renderers and recorded
//! demos: static layouts once, ticking state per frame.

use aep_core::graph::MemoryGraph;
use aep_core::metrics::SystemMetric;
use aep_core::FeedItem;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export file could not be created or written
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// Export data could not be encoded
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A 3D point with its node id and tooltip annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub commits: u32,
}

impl NodePoint {
    pub fn new(id: u32, pos: &Vector3<f64>, commits: u32) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            z: pos.z,
            commits,
        }
    }
}

/// The static graph layout, exported once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodePoint>,
    pub edges: Vec<(u32, u32)>,
}

impl GraphExport {
    pub fn from_graph(graph: &MemoryGraph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodePoint::new(n.id, &n.position, n.commits()))
                .collect(),
            edges: graph.edges().iter().map(|e| (e.from, e.to)).collect(),
        }
    }
}

/// One frame of ticking page state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoFrame {
    /// Page time in seconds
    pub time_sec: f64,

    /// Retained feed items, most recent first
    pub feed: Vec<FeedItem>,

    /// Current metric tiles
    pub metrics: Vec<SystemMetric>,

    /// Console system load percentage
    pub system_load: f64,

    /// Console entries revealed so far
    pub console_visible: usize,

    /// Boot splash progress
    pub boot_progress: u8,

    /// Typed characters of the current assistant answer
    pub typed_chars: usize,
}

/// Complete demo export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoExport {
    /// Unique id of this recording
    pub run_id: Uuid,

    /// Scenario name
    pub scenario: String,

    /// Session seed used
    pub seed: u64,

    /// Duration in seconds
    pub duration_sec: f64,

    /// Static graph layout
    pub graph: GraphExport,

    /// All frames
    pub frames: Vec<DemoFrame>,

    /// Final result
    pub passed: bool,
}

impl DemoExport {
    /// Creates a new export container.
    pub fn new(scenario: &str, seed: u64, graph: GraphExport) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            scenario: scenario.to_string(),
            seed,
            duration_sec: 0.0,
            graph,
            frames: Vec::new(),
            passed: false,
        }
    }

    /// Adds a frame.
    pub fn add_frame(&mut self, frame: DemoFrame) {
        self.duration_sec = frame.time_sec;
        self.frames.push(frame);
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, passed: bool) {
        self.passed = passed;
    }

    /// Writes the export as pretty JSON.
    pub fn write_to_file(&self, path: &str) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
