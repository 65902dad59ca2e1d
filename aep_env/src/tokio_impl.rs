//! Production implementation of AepContext using Tokio.

use crate::AepContext;
use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Production context: real clock, real sleeps.
///
/// Used by the live demo binary. Monotonic time counts from context
/// creation; wall-clock time is the system clock. The session seed is
/// whatever the operator supplied, or one draw of OS entropy when they
/// asked for a random session.
pub struct TokioContext {
    /// Creation instant, origin of `now()`
    start: Instant,

    /// Session seed reported by `seed()`; 0 means unseeded
    session_seed: u64,
}

impl TokioContext {
    /// Unseeded context; `seed()` reports 0.
    pub fn new() -> Self {
        Self::with_session_seed(0)
    }

    /// Context carrying an operator-chosen session seed.
    pub fn with_session_seed(seed: u64) -> Self {
        Self {
            start: Instant::now(),
            session_seed: seed,
        }
    }

    /// Context with a session seed drawn once from OS entropy.
    ///
    /// A random session still needs a concrete seed so the run can be
    /// logged and replayed later.
    pub fn from_entropy() -> Self {
        Self::with_session_seed(OsRng.next_u64())
    }

    /// Arc-wrapped context for sharing across tasks.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl Default for TokioContext {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AepContext for TokioContext {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn seed(&self) -> u64 {
        self.session_seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_monotonic_time_moves_with_sleep() {
        let ctx = TokioContext::new();
        let before = ctx.now();
        ctx.sleep(Duration::from_millis(10)).await;
        assert!(ctx.now() - before >= Duration::from_millis(10));
    }

    #[test]
    fn test_seed_reporting() {
        assert_eq!(TokioContext::new().seed(), 0);
        assert_eq!(TokioContext::with_session_seed(2025).seed(), 2025);
    }

    #[test]
    fn test_epoch_millis_is_current() {
        // Any machine running this is comfortably past 2020-01-01.
        assert!(TokioContext::new().epoch_millis() > 1_577_836_800_000);
    }
}
