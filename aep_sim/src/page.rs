//! DemoPage - the full landing experience on one timeline.

use aep_core::boot::{BootSequence, BOOT_STEP_INTERVAL};
use aep_core::console::{ConsoleSession, LOAD_INTERVAL, REVEAL_INTERVAL};
use aep_core::feed::{FeedConfig, FEED_INTERVAL, STEADY_FEED_SEED};
use aep_core::knowledge::{AssistantDemo, TYPE_INTERVAL};
use aep_core::metrics::{MetricsBoard, METRICS_INTERVAL};
use aep_core::{ConfigError, LiveFeed, MemoryGraph, OrbitField, StarField};
use aep_env::AepContext;
use std::time::Duration;
use tracing::debug;

/// Configuration for a composite page run.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Master session seed; the steady feed and the jitter walks are
    /// derived from it
    pub seed: u64,

    /// Live feed capacity
    pub feed_capacity: usize,

    /// Base timeline granularity in milliseconds
    pub tick_ms: u64,

    /// Maximum page run duration in seconds
    pub max_duration_secs: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            seed: STEADY_FEED_SEED as u64,
            feed_capacity: aep_core::feed::FEED_CAPACITY,
            tick_ms: 10,
            max_duration_secs: 60.0,
        }
    }
}

/// A fixed-period cadence on the shared timeline.
#[derive(Debug, Clone)]
struct Cadence {
    period: Duration,
    elapsed: Duration,
}

impl Cadence {
    fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Accumulates `dt` and returns how many periods fired.
    fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fires += 1;
        }
        fires
    }
}

/// Engine activity produced by one page step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageEvents {
    pub feed_items: u32,
    pub reveals: u32,
    pub load_steps: u32,
    pub metric_refreshes: u32,
    pub boot_steps: u32,
    pub chars_typed: u32,
}

/// The whole landing experience: every engine on a shared timeline, each
/// firing at its own cadence (feed 2.5 s, metrics 3 s, load 1 s, console
/// reveal 2.5 s, boot and typewriter 30 ms).
///
/// The static layouts (graph, orbit, stars) are generated once at
/// construction; the ticking engines advance in `step`.
pub struct DemoPage {
    pub feed: LiveFeed,
    pub console: ConsoleSession,
    pub metrics: MetricsBoard,
    pub boot: BootSequence,
    pub assistant: AssistantDemo,
    pub graph: MemoryGraph,
    pub orbit: OrbitField,
    pub stars: StarField,

    feed_cadence: Cadence,
    reveal_cadence: Cadence,
    load_cadence: Cadence,
    metrics_cadence: Cadence,
    boot_cadence: Cadence,
    type_cadence: Cadence,

    ticks: u64,
}

impl DemoPage {
    /// Builds the page at `now_ms` wall-clock milliseconds.
    ///
    /// Sub-seeds for the jitter walks are derived from the session seed so
    /// that one number reproduces the whole page.
    pub fn new(config: &PageConfig, now_ms: u64) -> Result<Self, ConfigError> {
        let steady_seed = config.seed as i64;
        let load_seed = config.seed.wrapping_mul(0x9e3779b97f4a7c15) as i64;
        let metrics_seed = config.seed.wrapping_mul(0x517cc1b727220a95) as i64;

        let feed_config = FeedConfig {
            steady_seed,
            capacity: config.feed_capacity,
            ..FeedConfig::default()
        };

        Ok(Self {
            feed: LiveFeed::with_config(&feed_config, now_ms)?,
            console: ConsoleSession::new(load_seed),
            metrics: MetricsBoard::new(metrics_seed),
            boot: BootSequence::new(),
            assistant: AssistantDemo::new(),
            graph: MemoryGraph::generate(),
            orbit: OrbitField::generate(),
            stars: StarField::generate(),
            feed_cadence: Cadence::new(FEED_INTERVAL),
            reveal_cadence: Cadence::new(REVEAL_INTERVAL),
            load_cadence: Cadence::new(LOAD_INTERVAL),
            metrics_cadence: Cadence::new(METRICS_INTERVAL),
            boot_cadence: Cadence::new(BOOT_STEP_INTERVAL),
            type_cadence: Cadence::new(TYPE_INTERVAL),
            ticks: 0,
        })
    }

    /// Advances the timeline by `dt`, firing every engine whose cadence
    /// elapsed. `now_ms` stamps any feed items produced.
    pub fn step(&mut self, dt: Duration, now_ms: u64) -> PageEvents {
        let mut events = PageEvents::default();

        for _ in 0..self.feed_cadence.advance(dt) {
            self.feed.advance(now_ms);
            events.feed_items += 1;
        }

        for _ in 0..self.reveal_cadence.advance(dt) {
            if self.console.reveal_next().is_some() {
                events.reveals += 1;
            }
        }

        for _ in 0..self.load_cadence.advance(dt) {
            self.console.step_load();
            events.load_steps += 1;
        }

        for _ in 0..self.metrics_cadence.advance(dt) {
            self.metrics.step();
            events.metric_refreshes += 1;
        }

        for _ in 0..self.boot_cadence.advance(dt) {
            if !self.boot.is_complete() {
                self.boot.step();
                events.boot_steps += 1;
            }
        }

        for _ in 0..self.type_cadence.advance(dt) {
            if self.assistant.type_tick() {
                events.chars_typed += 1;
            }
        }

        self.ticks += 1;
        events
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

/// Drives a page against a real or simulated clock, logging feed items as
/// they arrive. Returns the number of feed items emitted.
pub async fn run_page<C: AepContext>(
    ctx: &C,
    page: &mut DemoPage,
    duration: Duration,
    tick: Duration,
) -> u64 {
    let mut emitted = 0;
    let mut elapsed = Duration::ZERO;

    while elapsed < duration {
        ctx.sleep(tick).await;
        elapsed += tick;

        let events = page.step(tick, ctx.epoch_millis());
        if events.feed_items > 0 {
            for item in page.feed.items().iter().take(events.feed_items as usize) {
                debug!("feed: {}", item.text);
            }
            emitted += events.feed_items as u64;
        }
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;

    fn run_for(page: &mut DemoPage, ctx: &SimContext, secs: u64, tick_ms: u64) {
        let dt = Duration::from_millis(tick_ms);
        let steps = secs * 1_000 / tick_ms;
        for _ in 0..steps {
            ctx.advance_time(dt);
            page.step(dt, ctx.epoch_millis());
        }
    }

    #[test]
    fn test_cadence_fires_on_schedule() {
        let mut cadence = Cadence::new(Duration::from_millis(2_500));
        assert_eq!(cadence.advance(Duration::from_millis(2_000)), 0);
        assert_eq!(cadence.advance(Duration::from_millis(500)), 1);
        assert_eq!(cadence.advance(Duration::from_millis(5_000)), 2);
    }

    #[test]
    fn test_page_engines_fire_at_their_rates() {
        let ctx = SimContext::new(2025);
        let mut page = DemoPage::new(&PageConfig::default(), ctx.epoch_millis()).unwrap();

        run_for(&mut page, &ctx, 10, 10);

        // 10s: 4 feed ticks, 10 load steps, 3 metric refreshes, console
        // revealed to completion (2 remaining entries at 2.5s cadence).
        assert_eq!(page.feed.items().len(), 6);
        assert!(page.console.is_complete());
        assert!(page.boot.is_complete());
    }

    #[test]
    fn test_page_replays_identically_for_a_seed() {
        let config = PageConfig::default();

        let ctx_a = SimContext::new(config.seed);
        let ctx_b = SimContext::new(config.seed);
        let mut page_a = DemoPage::new(&config, ctx_a.epoch_millis()).unwrap();
        let mut page_b = DemoPage::new(&config, ctx_b.epoch_millis()).unwrap();

        run_for(&mut page_a, &ctx_a, 30, 10);
        run_for(&mut page_b, &ctx_b, 30, 10);

        let ids_a: Vec<_> = page_a.feed.items().iter().map(|i| i.id.clone()).collect();
        let ids_b: Vec<_> = page_b.feed.items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(page_a.metrics.metrics(), page_b.metrics.metrics());
        assert_eq!(page_a.console.system_load(), page_b.console.system_load());
    }
}
