use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Outcome of one rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request recorded; `remaining` more fit in the current window
    Allowed { remaining: usize },
    /// Over the limit until the oldest request leaves the window
    Limited { retry_after: Duration },
}

/// Sliding-window rate limiter keyed by client (usually the peer IP).
///
/// Timestamps of accepted requests are kept per client; rejected requests are not
/// recorded, so a client that keeps retrying is admitted as soon as the window frees up.
pub struct RateLimiter {
    requests: HashMap<String, Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    pub fn check_at(&mut self, client: &str, now: Instant) -> Decision {
        let window = self.window;
        let timestamps = self.requests.entry(client.to_string()).or_default();

        timestamps.retain(|&t| now.saturating_duration_since(t) < window);

        if timestamps.len() < self.limit {
            timestamps.push(now);
            return Decision::Allowed {
                remaining: self.limit - timestamps.len(),
            };
        }

        // Timestamps are pushed in order, so the first one expires first
        let retry_after = timestamps
            .first()
            .map(|&oldest| window.saturating_sub(now.saturating_duration_since(oldest)))
            .unwrap_or(window);

        Decision::Limited { retry_after }
    }

    /// Forgets clients with no request inside the window. Returns how many were dropped.
    pub fn prune_idle(&mut self, now: Instant) -> usize {
        let window = self.window;
        let before = self.requests.len();
        self.requests.retain(|_, timestamps| {
            timestamps
                .last()
                .is_some_and(|&t| now.saturating_duration_since(t) < window)
        });
        before - self.requests.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

/// Whole seconds for a `Retry-After` header, never zero.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 || secs == 0 {
        secs + 1
    } else {
        secs
    }
}
