//! Virtual-clock context for deterministic replays.

use aep_env::AepContext;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock instant that virtual time zero maps to: 2025-01-01 00:00:00 UTC.
///
/// Every replay starts from the same epoch, so feed item ids (which embed
/// wall-clock milliseconds) are byte-comparable across runs and machines.
const REPLAY_EPOCH_SECS: u64 = 1_735_689_600;

/// `AepContext` backed by a manually driven clock.
///
/// Nothing advances on its own: the harness moves time forward tick by
/// tick, and `sleep` resolves instantly by advancing the clock instead of
/// waiting. Clones share the clock, so engines handed a clone all observe
/// the same timeline.
pub struct SimContext {
    /// Session seed reported to engines and logs
    seed: u64,

    /// Elapsed virtual time, shared across clones
    clock: Arc<Mutex<Duration>>,

    /// Wall-clock anchor for `system_time`
    epoch: SystemTime,
}

impl SimContext {
    /// Creates a context at virtual time zero with the standard replay epoch.
    pub fn new(seed: u64) -> Self {
        Self::anchored(seed, UNIX_EPOCH + Duration::from_secs(REPLAY_EPOCH_SECS))
    }

    /// Creates a context anchored to a custom wall-clock epoch.
    pub fn anchored(seed: u64, epoch: SystemTime) -> Self {
        Self {
            seed,
            clock: Arc::new(Mutex::new(Duration::ZERO)),
            epoch,
        }
    }

    /// Creates an Arc-wrapped context for sharing.
    pub fn shared(seed: u64) -> Arc<Self> {
        Arc::new(Self::new(seed))
    }

    /// Moves the clock forward by `dt`.
    pub fn advance_time(&self, dt: Duration) {
        *self.clock.lock().unwrap() += dt;
    }

    /// Jumps the clock to an absolute virtual time.
    ///
    /// Only forward jumps make sense for the engines; the clock accepts
    /// any value and leaves ordering guarantees to the caller.
    pub fn set_elapsed(&self, elapsed: Duration) {
        *self.clock.lock().unwrap() = elapsed;
    }

    /// Virtual time elapsed since the start of the run.
    pub fn elapsed(&self) -> Duration {
        *self.clock.lock().unwrap()
    }
}

impl Clone for SimContext {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            clock: Arc::clone(&self.clock),
            epoch: self.epoch,
        }
    }
}

#[async_trait]
impl AepContext for SimContext {
    fn now(&self) -> Duration {
        self.elapsed()
    }

    fn system_time(&self) -> SystemTime {
        self.epoch + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        // Sleeping in a replay just moves the timeline.
        self.advance_time(duration);
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero_and_accumulates() {
        let ctx = SimContext::new(2025);
        assert_eq!(ctx.now(), Duration::ZERO);

        ctx.advance_time(Duration::from_millis(2_500));
        ctx.advance_time(Duration::from_millis(2_500));
        assert_eq!(ctx.now(), Duration::from_secs(5));

        ctx.set_elapsed(Duration::from_secs(60));
        assert_eq!(ctx.now(), Duration::from_secs(60));
    }

    #[test]
    fn test_feed_timestamps_are_replayable() {
        // Two independent replays stamp items with identical milliseconds.
        let a = SimContext::new(1);
        let b = SimContext::new(1);
        a.advance_time(Duration::from_millis(2_500));
        b.advance_time(Duration::from_millis(2_500));

        assert_eq!(a.epoch_millis(), b.epoch_millis());
        assert_eq!(a.epoch_millis(), REPLAY_EPOCH_SECS * 1_000 + 2_500);
    }

    #[tokio::test]
    async fn test_sleep_advances_instead_of_waiting() {
        let ctx = SimContext::new(7);
        ctx.sleep(Duration::from_secs(3_600)).await;
        assert_eq!(ctx.now(), Duration::from_secs(3_600));
    }

    #[test]
    fn test_clones_share_the_timeline() {
        let ctx = SimContext::new(42);
        let observer = ctx.clone();

        ctx.advance_time(Duration::from_secs(5));
        assert_eq!(observer.now(), Duration::from_secs(5));
        assert_eq!(observer.seed(), 42);
    }
}
