use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window limiter keyed by caller, e.g. `login:<ip>`.
pub struct RateLimiter {
    requests: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt for `key`. Returns false once `max_requests`
    /// attempts already happened inside `window`.
    pub fn check_rate_limit(&self, key: &str, max_requests: usize, window: Duration) -> bool {
        self.check_at(key, max_requests, window, Instant::now())
    }

    fn check_at(&self, key: &str, max_requests: usize, window: Duration, now: Instant) -> bool {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();
        while entry
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= window)
        {
            entry.pop_front();
        }

        if entry.len() >= max_requests {
            return false;
        }

        entry.push_back(now);
        true
    }
}
