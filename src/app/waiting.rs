//! Waiting registry - outstanding-operation counters keyed by name

use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitingState {
    counts: HashMap<String, u32>,
}

impl WaitingState {
    pub fn increment(&mut self, key: &str) {
        *self.counts.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Decrement, never below zero; keys at zero are dropped
    pub fn decrement(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.counts.remove(key);
            }
        } else {
            tracing::warn!(key, "Decrement of a key that isn't waiting");
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.counts.remove(key);
    }

    pub fn count(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_waiting(&self, key: &str) -> bool {
        self.count(key) > 0
    }
}
