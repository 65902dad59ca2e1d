//! AEP Deterministic Demo Harness
//!
//! This crate drives the `aep_core` content engines the way the landing
//! page does - on timers - but against a virtual clock, so that an entire
//! demo session becomes a pure function of its seed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        DemoPage                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ SimContext (virtual clock, fixed epoch)            │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │     │ 2.5s      │ 3s        │ 1s        │ 30ms           │
//! │  ┌──▼─────┐ ┌───▼────┐ ┌────▼────┐ ┌────▼─────┐          │
//! │  │ Live   │ │ Metric │ │ Console │ │ Boot +   │   ...    │
//! │  │ Feed   │ │ Board  │ │ Load    │ │ Typist   │          │
//! │  └────────┘ └────────┘ └─────────┘ └──────────┘          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use aep_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let runner = ScenarioRunner::new(2025).with_duration(30.0);
//! let result = runner.run(ScenarioId::FullPage);
//! assert!(result.passed);
//! ```

mod context;
mod exporter;
mod page;
mod runner;
pub mod scenarios;

pub use context::SimContext;
pub use exporter::{DemoExport, DemoFrame, ExportError, GraphExport, NodePoint};
pub use page::{run_page, DemoPage, PageConfig, PageEvents};
pub use runner::{DemoMetrics, ScenarioResult, ScenarioRunner};
pub use scenarios::ScenarioId;
