//! Core environment context trait for the AEP demo engines.

use async_trait::async_trait;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The central interface for environment interaction.
///
/// This trait abstracts the host clock so that the demo engines can run
/// in both production (tokio) and simulation (virtual clock) environments.
///
/// # Implementations
///
/// - **Production**: `TokioContext` - wraps `tokio::time`, OS entropy
/// - **Simulation**: `SimContext` (in `aep_sim`) - manually advanced clock
///
/// # Determinism
///
/// Content is derived from explicit seeded generators, never from ambient
/// randomness, so controlling time via this trait is enough to make a full
/// demo session replayable.
#[async_trait]
pub trait AepContext: Send + Sync + 'static {
    /// Returns the current monotonic time since context creation.
    ///
    /// Used for engine cadences and duration measurements.
    /// In simulation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Returns the wall-clock time for feed item timestamps.
    ///
    /// In simulation, this is derived from virtual clock + epoch offset.
    fn system_time(&self) -> SystemTime;

    /// Suspends execution for the given duration.
    ///
    /// In production: wraps `tokio::time::sleep`
    /// In simulation: advances the virtual clock
    async fn sleep(&self, duration: Duration);

    /// Returns the session seed (for logging/debugging).
    ///
    /// In production, 0 unless explicitly seeded or drawn from entropy.
    /// In simulation, the master seed.
    fn seed(&self) -> u64;

    /// Wall-clock milliseconds since the Unix epoch.
    ///
    /// Feed item ids and timestamps use this value. A clock before the
    /// epoch falls back to 0 rather than failing the demo.
    fn epoch_millis(&self) -> u64 {
        self.system_time()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
