//! Login throttling
//!
//! Failed attempts are counted per client address over a sliding window; a
//! successful login clears the count.

use crate::consts::dashboard_consts::server::{LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW_SECS};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct LoginLimiter {
    max_attempts: u32,
    window: Duration,
    failures: Mutex<HashMap<String, Vec<Instant>>>,
}

impl Default for LoginLimiter {
    fn default() -> Self {
        Self::new(LOGIN_MAX_ATTEMPTS, Duration::from_secs(LOGIN_WINDOW_SECS))
    }
}

impl LoginLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// `Err` carries how long until the oldest counted failure leaves the
    /// window.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        let now = Instant::now();
        let Ok(mut failures) = self.failures.lock() else {
            return Ok(());
        };
        self.prune(&mut failures, now);
        let Some(times) = failures.get(client) else {
            return Ok(());
        };

        if times.len() >= self.max_attempts as usize {
            let oldest = times.first().copied().unwrap_or(now);
            return Err(self.window.saturating_sub(now.duration_since(oldest)));
        }
        Ok(())
    }

    pub fn record_failure(&self, client: &str) {
        let now = Instant::now();
        if let Ok(mut failures) = self.failures.lock() {
            self.prune(&mut failures, now);
            failures.entry(client.to_string()).or_default().push(now);
        }
    }

    pub fn reset(&self, client: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.remove(client);
        }
    }

    /// Number of clients with failures still inside the window.
    pub fn tracked_clients(&self) -> usize {
        self.failures.lock().map(|failures| failures.len()).unwrap_or(0)
    }

    /// Drops attempts outside the window, and clients left with none.
    fn prune(&self, failures: &mut HashMap<String, Vec<Instant>>, now: Instant) {
        failures.retain(|_, times| {
            times.retain(|&time| now.duration_since(time) <= self.window);
            !times.is_empty()
        });
    }
}
