//! Cluster names by uuid, refreshed at most once per TTL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ClusterCache {
    ttl: Duration,
    entry: Mutex<Option<(Instant, HashMap<String, String>)>>,
}

impl ClusterCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// The cached map, if it is younger than the TTL.
    pub fn get(&self) -> Option<HashMap<String, String>> {
        let entry = self.entry.lock().ok()?;
        match entry.as_ref() {
            Some((stored, names)) if stored.elapsed() < self.ttl => Some(names.clone()),
            _ => None,
        }
    }

    pub fn store(&self, names: HashMap<String, String>) {
        if let Ok(mut entry) = self.entry.lock() {
            *entry = Some((Instant::now(), names));
        }
    }
}
