use std::sync::Arc;

/// Live mapping from HostPattern to backend URL.
///
/// Lookups are exact-match and must never observe a partially written URL, even while
/// registrations for the same key are in flight. Later registrations overwrite earlier ones.
pub trait ServiceRegistry: Send + Sync {
    fn register(&self, pattern: &str, url: &str);

    fn lookup(&self, pattern: &str) -> Option<Arc<str>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
