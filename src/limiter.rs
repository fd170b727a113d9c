//! Global request pacing.
//!
//! Remote catalogs get one shared [`RateLimiter`] per run: no two outbound
//! requests, regardless of which source task issues them, are started closer
//! together than the configured minimum interval. This is process-wide
//! pacing, not per-source pacing.
//!
//! The last-turn timestamp is the only mutable state and lives behind a
//! `tokio::sync::Mutex`. The lock is held across the pacing sleep, which
//! gives two guarantees at once: turns are granted in arrival order (the
//! tokio mutex queues waiters FIFO) and the interval between consecutive
//! grants never undershoots `min_interval`.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// Enforces a minimum spacing between outbound requests across all callers.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_turn: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter granting turns no closer together than `min_interval`.
    ///
    /// A zero interval disables pacing without changing the call sites.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_turn: Mutex::new(None),
        }
    }

    /// Suspend until this caller's turn is granted.
    ///
    /// The first caller is granted immediately; every later caller waits
    /// until `min_interval` has elapsed since the previous grant. Callers
    /// are served in the order they arrive.
    pub async fn await_turn(&self) {
        let mut last = self.last_turn.lock().await;
        if let Some(prev) = *last {
            let next = prev + self.min_interval;
            if next > Instant::now() {
                trace!(?next, "Pacing: waiting for turn");
                sleep_until(next).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_turn_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let start = Instant::now();
        limiter.await_turn().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_turns_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(30));
        let start = Instant::now();
        for _ in 0..3 {
            limiter.await_turn().await;
        }
        // Three turns means two full gaps.
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..50 {
            limiter.await_turn().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_concurrent_callers_are_paced() {
        use futures::stream::{FuturesUnordered, StreamExt};
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(20)));
        let start = Instant::now();

        let mut turns = FuturesUnordered::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            turns.push(async move { limiter.await_turn().await });
        }
        while turns.next().await.is_some() {}

        // Four turns across concurrent callers means three full gaps.
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
