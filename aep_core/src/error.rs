//! Error types for engine configuration.

use thiserror::Error;

/// Errors raised while validating engine configuration.
///
/// The generators and engines themselves are total functions; the only
/// failures in this crate are nonsensical configurations supplied by a
/// caller (typically CLI flags forwarded by the demo harness).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A bounded list must be able to hold at least one item
    #[error("capacity must be at least 1")]
    ZeroCapacity,

    /// Point fields and graphs need at least one node
    #[error("{what} count must be at least 1")]
    ZeroCount {
        /// Which collection was configured empty ("node", "star", ...)
        what: &'static str,
    },

    /// Seed items cannot exceed the bounded list they seed
    #[error("initial item count {requested} exceeds feed capacity {capacity}")]
    InitialCountExceedsCapacity { requested: usize, capacity: usize },
}
