use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Entry history is memoized for 15 minutes.
pub const POINTS_TTL: Duration = Duration::from_secs(15 * 60);
/// The season calendar changes at most once per deadline; 5 minutes is plenty.
pub const CALENDAR_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// In-memory memo with a fixed validity window per entry.
/// Expired entries are kept until overwritten; `get` just stops returning them.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: HashMap::new() }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.fetched_at) < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&mut self, key: K, value: V, fetched_at: Instant) {
        self.entries.insert(key, CacheEntry { value, fetched_at });
    }

    /// Drop everything, forcing the next lookup to miss.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at(1u64, "a", t0);
        assert_eq!(cache.get_at(&1, t0 + Duration::from_secs(59)), Some("a"));
    }

    #[test]
    fn entry_expires_at_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at(1u64, "a", t0);
        assert_eq!(cache.get_at(&1, t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn reinsert_restarts_window() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert_at(1u64, "a", t0);
        cache.insert_at(1u64, "b", t0 + Duration::from_secs(50));
        assert_eq!(cache.get_at(&1, t0 + Duration::from_secs(100)), Some("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_forces_miss() {
        let mut cache = TtlCache::new(POINTS_TTL);
        cache.insert(7u64, 3);
        assert_eq!(cache.get(&7), Some(3));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&7), None);
    }
}
