//! Live system feed.
//!
//! The landing page's "Live System Feed" panel: a bounded, most-recent-first
//! list of mock activity sentences, grown by a periodic tick. Item content
//! is sampled from a [`SequenceGenerator`] so a given pair of seeds always
//! produces the same transcript.
//!
//! Two generators are involved, deliberately not unified: the batch of
//! items visible on first paint comes from [`INITIAL_FEED_SEED`], while
//! every subsequent tick draws from [`STEADY_FEED_SEED`]. Distinct seeds
//! keep the opening screen stable even when the steady-state stream is
//! re-seeded for a session.

use crate::error::ConfigError;
use crate::sequence::SequenceGenerator;
use aep_env::AepContext;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Agent names sampled into feed sentences.
pub const FEED_AGENTS: [&str; 5] = ["Orion", "Lyra", "Atlas", "Nova", "Helix"];

/// Number of action templates in [`action_text`].
pub const ACTION_COUNT: usize = 5;

/// Seed for the items visible on first paint.
pub const INITIAL_FEED_SEED: i64 = 13_579;

/// Seed for the steady-state ticking stream.
pub const STEADY_FEED_SEED: i64 = 2_025;

/// Maximum retained items; the oldest entry is evicted beyond this.
pub const FEED_CAPACITY: usize = 6;

/// Items composed at construction time.
pub const INITIAL_ITEM_COUNT: usize = 4;

/// Cadence of the steady-state tick.
pub const FEED_INTERVAL: Duration = Duration::from_millis(2_500);

/// A single feed entry.
///
/// This shape (`id`, `text`, `timestamp_ms`) is the externally observable
/// contract consumed by renderers and the export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    /// `"{timestamp_ms}-{roll-derived suffix}"`, unique within a session
    pub id: String,

    /// Full sentence, e.g. `"Agent Lyra merged PR #127"`
    pub text: String,

    /// Wall-clock milliseconds at composition time
    pub timestamp_ms: u64,
}

/// Renders action template `kind` with magnitude `n`.
pub fn action_text(kind: usize, n: u32) -> String {
    match kind {
        0 => format!("merged PR #{}", 110 + n),
        1 => format!("opened PR #{}", 130 + n),
        2 => format!("deployed build {} to staging", 400 + n),
        3 => format!("resolved test flake in suite {}", 12 + n % 3),
        _ => format!("expanded memory graph with {} nodes", 2 + n % 4),
    }
}

/// Composes one feed item, consuming exactly three draws.
///
/// Draw order is part of the replay contract: `roll` first, then the
/// agent index, then the action index. The magnitude reuses `roll`.
pub fn compose_item(generator: &mut SequenceGenerator, timestamp_ms: u64) -> FeedItem {
    let roll = generator.next_f64();
    let agent = FEED_AGENTS[generator.next_index(FEED_AGENTS.len())];
    let action = generator.next_index(ACTION_COUNT);
    let magnitude = (roll * 50.0) as u32;

    let text = format!("Agent {} {}", agent, action_text(action, magnitude));
    let id = format!("{}-{}", timestamp_ms, (roll * 1_000_000.0) as u64);

    FeedItem {
        id,
        text,
        timestamp_ms,
    }
}

/// Configuration for a [`LiveFeed`].
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Seed for the first-paint item batch
    pub initial_seed: i64,

    /// Seed for the steady-state tick generator
    pub steady_seed: i64,

    /// Bounded list capacity
    pub capacity: usize,

    /// Items composed at construction
    pub initial_count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_seed: INITIAL_FEED_SEED,
            steady_seed: STEADY_FEED_SEED,
            capacity: FEED_CAPACITY,
            initial_count: INITIAL_ITEM_COUNT,
        }
    }
}

/// The live feed engine: a capped, most-recent-first item list plus the
/// generator that grows it.
///
/// Owned exclusively by whichever component drives it; ticks are applied
/// synchronously by the host's timer, so there is no interior locking.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    generator: SequenceGenerator,
    items: Vec<FeedItem>,
    capacity: usize,
}

impl LiveFeed {
    /// Creates a feed with the product-default seeds and capacity.
    pub fn new(now_ms: u64) -> Self {
        // Defaults are statically valid; validation cannot fail here.
        Self::build(&FeedConfig::default(), now_ms)
    }

    /// Creates a feed from an explicit configuration.
    pub fn with_config(config: &FeedConfig, now_ms: u64) -> Result<Self, ConfigError> {
        if config.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if config.initial_count > config.capacity {
            return Err(ConfigError::InitialCountExceedsCapacity {
                requested: config.initial_count,
                capacity: config.capacity,
            });
        }
        Ok(Self::build(config, now_ms))
    }

    fn build(config: &FeedConfig, now_ms: u64) -> Self {
        let mut seed_generator = SequenceGenerator::new(config.initial_seed);
        let items = (0..config.initial_count)
            .map(|_| compose_item(&mut seed_generator, now_ms))
            .collect();

        Self {
            generator: SequenceGenerator::new(config.steady_seed),
            items,
            capacity: config.capacity,
        }
    }

    /// Advances the steady-state generator, prepends the derived item and
    /// evicts the oldest entry if the list is full.
    pub fn advance(&mut self, now_ms: u64) -> &FeedItem {
        let item = compose_item(&mut self.generator, now_ms);
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
        &self.items[0]
    }

    /// [`advance`](Self::advance) with the timestamp taken from a context.
    pub fn advance_with<C: AepContext>(&mut self, ctx: &C) -> &FeedItem {
        self.advance(ctx.epoch_millis())
    }

    /// Retained items, most recent first.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_of(item: &FeedItem) -> Option<&'static str> {
        FEED_AGENTS
            .iter()
            .copied()
            .find(|agent| item.text.starts_with(&format!("Agent {} ", agent)))
    }

    #[test]
    fn test_initial_items_come_from_their_own_seed() {
        let feed_a = LiveFeed::new(1_000);
        let feed_b = LiveFeed::new(1_000);

        assert_eq!(feed_a.len(), INITIAL_ITEM_COUNT);
        assert_eq!(feed_a.items(), feed_b.items());

        // Re-seeding the steady stream must not disturb the opening batch.
        let config = FeedConfig {
            steady_seed: 777,
            ..FeedConfig::default()
        };
        let feed_c = LiveFeed::with_config(&config, 1_000).unwrap();
        assert_eq!(feed_a.items(), feed_c.items());
    }

    #[test]
    fn test_items_are_well_formed_sentences() {
        let mut feed = LiveFeed::new(1_000);
        for tick in 0..20 {
            feed.advance(1_000 + tick * 2_500);
        }
        for item in feed.items() {
            assert!(!item.text.is_empty());
            assert!(agent_of(item).is_some(), "unknown agent in {:?}", item.text);
            assert!(item.id.starts_with(&format!("{}-", item.timestamp_ms)));
        }
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut feed = LiveFeed::new(0);
        for tick in 0..50 {
            feed.advance(tick);
            assert!(feed.len() <= FEED_CAPACITY);
        }
        assert_eq!(feed.len(), FEED_CAPACITY);
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut feed = LiveFeed::new(0);
        for tick in 1..=10u64 {
            feed.advance(tick * 2_500);
        }
        let stamps: Vec<u64> = feed.items().iter().map(|i| i.timestamp_ms).collect();
        let mut sorted = stamps.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn test_same_steady_seed_replays_the_same_transcript() {
        let mut feed_a = LiveFeed::new(0);
        let mut feed_b = LiveFeed::new(0);
        for tick in 0..12 {
            let a = feed_a.advance(tick).text.clone();
            let b = feed_b.advance(tick).text.clone();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_different_steady_seeds_diverge_on_first_tick() {
        let config = FeedConfig {
            steady_seed: STEADY_FEED_SEED + 1,
            ..FeedConfig::default()
        };
        let mut feed_a = LiveFeed::new(0);
        let mut feed_b = LiveFeed::with_config(&config, 0).unwrap();
        assert_ne!(feed_a.advance(0).id, feed_b.advance(0).id);
    }

    #[test]
    fn test_config_validation() {
        let zero_cap = FeedConfig {
            capacity: 0,
            ..FeedConfig::default()
        };
        assert_eq!(
            LiveFeed::with_config(&zero_cap, 0).unwrap_err(),
            ConfigError::ZeroCapacity
        );

        let oversized = FeedConfig {
            capacity: 2,
            initial_count: 4,
            ..FeedConfig::default()
        };
        assert!(matches!(
            LiveFeed::with_config(&oversized, 0).unwrap_err(),
            ConfigError::InitialCountExceedsCapacity { requested: 4, capacity: 2 }
        ));
    }

    #[test]
    fn test_steady_seed_end_to_end() {
        // Four draws from the steady seed: distinct, in range, and the
        // formatter turns the same stream into four proper sentences.
        let mut generator = SequenceGenerator::new(STEADY_FEED_SEED);
        let draws: Vec<f64> = (0..4).map(|_| generator.next_f64()).collect();
        for v in &draws {
            assert!((0.0..1.0).contains(v));
        }
        for i in 0..draws.len() {
            for j in (i + 1)..draws.len() {
                assert_ne!(draws[i], draws[j]);
            }
        }

        let mut generator = SequenceGenerator::new(STEADY_FEED_SEED);
        let items: Vec<FeedItem> = (0..4).map(|_| compose_item(&mut generator, 42)).collect();
        assert_eq!(items.len(), 4);
        for item in &items {
            assert!(agent_of(item).is_some(), "no roster agent in {:?}", item.text);
        }
    }

    #[test]
    fn test_magnitude_stays_bounded() {
        // Templates cap their inputs: suite in 12..=14, nodes in 2..=5.
        let mut generator = SequenceGenerator::new(STEADY_FEED_SEED);
        for _ in 0..200 {
            let item = compose_item(&mut generator, 0);
            if let Some(rest) = item.text.split("suite ").nth(1) {
                let suite: u32 = rest.trim().parse().unwrap();
                assert!((12..=14).contains(&suite));
            }
            if let Some(rest) = item.text.split("graph with ").nth(1) {
                let nodes: u32 = rest.split(' ').next().unwrap().parse().unwrap();
                assert!((2..=5).contains(&nodes));
            }
        }
    }
}
