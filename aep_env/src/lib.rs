//! AEP Environment Abstraction Layer
//!
//! This crate provides the seam that lets the AEP demo-content engines run
//! against both the **real** clock (tokio, in the live demo binary) and a
//! **virtual** clock (in the deterministic harness).
//!
//! # Core Concept
//!
//! Every "live" element of the landing experience is a timer-driven mock:
//! a periodic task that advances a seeded generator and derives one item.
//! The only sources of non-determinism are time and the session seed, so
//! intercepting those two makes every demo replayable:
//! - **Time**: `now()`, `system_time()`, `sleep()`
//! - **Seed**: `seed()` — fixed in simulation, OS entropy in production
//!
//! # Example
//!
//! ```ignore
//! use aep_env::AepContext;
//!
//! async fn feed_loop<C: AepContext>(ctx: &C, feed: &mut LiveFeed) {
//!     loop {
//!         ctx.sleep(FEED_INTERVAL).await;
//!         feed.advance(ctx.epoch_millis());
//!     }
//! }
//! ```

mod context;
mod tokio_impl;

pub use context::AepContext;
pub use tokio_impl::TokioContext;
