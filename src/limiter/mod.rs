//! Per-host rate limiting
//!
//! This module enforces a minimum gap between consecutive requests to the
//! same host. One `RateLimiter` is owned by the `Fetcher` and shared by
//! every call; different hosts never wait on each other.
//!
//! The minimum delay is shared process-wide and can only grow: when a
//! robots.txt declares a larger `Crawl-delay`, the new value applies to
//! all subsequent requests, matching the behavior of the service this
//! component replaces.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

struct LimiterState {
    /// Host -> earliest instant the next request to it may fire
    next_slot: HashMap<String, Instant>,

    /// Minimum gap between requests to the same host; raised, never lowered
    min_delay: Duration,
}

/// Enforces a minimum delay between requests to the same host
pub struct RateLimiter {
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    /// Creates a rate limiter with the given initial minimum delay
    pub fn new(min_delay: Duration) -> Self {
        Self {
            state: Mutex::new(LimiterState {
                next_slot: HashMap::new(),
                min_delay,
            }),
        }
    }

    /// Returns the current minimum delay
    pub fn min_delay(&self) -> Duration {
        self.state.lock().unwrap().min_delay
    }

    /// Raises the minimum delay to `delay` if it is larger than the
    /// current value; smaller values are ignored.
    pub fn raise_min_delay(&self, delay: Duration) {
        let mut state = self.state.lock().unwrap();
        if delay > state.min_delay {
            tracing::debug!(
                "Raising minimum request delay from {:?} to {:?}",
                state.min_delay,
                delay
            );
            state.min_delay = delay;
        }
    }

    /// Waits until a request to `host` is permitted, then records it.
    ///
    /// The next slot for the host is reserved under the lock before
    /// sleeping, so concurrent callers to the same host serialize instead
    /// of both observing a stale timestamp.
    pub async fn acquire(&self, host: &str) {
        let deadline = self.reserve(host, Instant::now());
        let wait = deadline.duration_since(Instant::now());
        if !wait.is_zero() {
            tracing::debug!(
                "Rate limiting: sleeping for {:.1}s before request to {}",
                wait.as_secs_f64(),
                host
            );
            tokio::time::sleep_until(deadline).await;
        }
    }

    /// Reserves the next request slot for `host` and returns it.
    fn reserve(&self, host: &str, now: Instant) -> Instant {
        let mut state = self.state.lock().unwrap();
        let slot = match state.next_slot.get(host) {
            Some(&next) if next > now => next,
            _ => now,
        };
        let min_delay = state.min_delay;
        state.next_slot.insert(host.to_string(), slot + min_delay);
        slot
    }
}
