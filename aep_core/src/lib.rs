//! AEP Core - Deterministic Demo Content Engines
//!
//! Everything "live" on the AEP landing experience is a timer-driven mock
//! backed by one primitive: a seeded Lehmer sequence generator. This crate
//! holds that generator and the engines built on it:
//! 1. **Live feed**: bounded, most-recent-first activity sentences
//! 2. **Memory graph / neural orbit**: seeded 3D point layouts
//! 3. **Console, metrics, knowledge, boot**: canned scripts and walks
//!
//! The engines are pure state machines; clocks and scheduling live behind
//! `aep_env::AepContext` so every surface replays deterministically.

pub mod agents;
pub mod boot;
pub mod console;
mod error;
pub mod feed;
pub mod graph;
pub mod knowledge;
pub mod metrics;
pub mod orbit;
pub mod sequence;

// Re-export key types for convenience
pub use error::ConfigError;
pub use feed::{FeedItem, LiveFeed};
pub use graph::MemoryGraph;
pub use orbit::{OrbitField, StarField};
pub use sequence::SequenceGenerator;
