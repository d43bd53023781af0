use dashmap::DashMap;
use sidecar_relay_application::ports::ServiceRegistry;
use std::sync::Arc;
use tracing::{debug, info};

/// Process-lifetime registry backed by a sharded concurrent map.
///
/// URLs are stored as `Arc<str>` and swapped whole on overwrite, so a reader holds either the
/// previous value or the new one. Writers to the same key serialize on the shard lock.
pub struct InMemoryServiceRegistry {
    entries: DashMap<String, Arc<str>>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Sorted copy of every entry.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().to_string()))
            .collect();
        entries.sort();
        entries
    }
}

impl Default for InMemoryServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry for InMemoryServiceRegistry {
    fn register(&self, pattern: &str, url: &str) {
        let previous = self.entries.insert(pattern.to_string(), Arc::from(url));

        match previous {
            Some(old) if &*old != url => {
                info!(pattern = %pattern, old = %old, new = %url, "Registry entry replaced");
            }
            Some(_) => debug!(pattern = %pattern, "Registry entry unchanged"),
            None => debug!(pattern = %pattern, url = %url, "Registry entry added"),
        }
    }

    fn lookup(&self, pattern: &str) -> Option<Arc<str>> {
        self.entries.get(pattern).map(|e| Arc::clone(e.value()))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
