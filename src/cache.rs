//! Key/value caching with a per-entry time to live.
//!
//! Entries expire passively: a read past the expiry reports a miss and evicts the
//! entry, there is no background sweeper. [`Cache::purge_expired`] is available
//! to callers that need to bound memory.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use dashmap::DashMap;

use crate::types::{DateTime, Utc};

/// Storage consulted by fetchers before making a network call.
pub trait Cache<K, V>: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value`, replacing any existing entry, to expire `ttl` from now.
    fn set(&self, key: K, value: V, ttl: Duration);

    /// Returns the absolute expiry of the live entry for `key`, if any.
    fn ttl(&self, key: &K) -> Option<DateTime<Utc>>;

    fn remove(&self, key: &K) -> Option<V>;

    /// Evicts every entry whose expiry has passed. Stores that expire entries on
    /// their own can keep the default no-op.
    fn purge_expired(&self) {}
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

impl<V> Entry<V> {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-memory [`Cache`] backed by a concurrent map.
///
/// Cloning is cheap and yields a handle to the same entries.
#[derive(Debug)]
pub struct TtlCache<K: Eq + Hash, V> {
    entries: Arc<DashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K: Eq + Hash, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn expiry_after(ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Utc::now();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // the read guard is released above; evict unless a writer refreshed it meanwhile
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    fn set(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: expiry_after(ttl),
            },
        );
    }

    fn ttl(&self, key: &K) -> Option<DateTime<Utc>> {
        let now = Utc::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.expires_at)
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, entry)| entry.value)
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        self.entries.retain(|_, entry| entry.is_live(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_live_value() {
        let cache = TtlCache::new();
        cache.set("pair", 15_u32, Duration::from_secs(60));

        assert_eq!(cache.get(&"pair"), Some(15));
        assert_eq!(cache.get(&"other"), None);
    }

    #[test]
    fn expired_entry_is_a_miss_and_evicted() {
        let cache = TtlCache::new();
        cache.set("pair", 15_u32, Duration::ZERO);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"pair"), None);
        assert_eq!(cache.ttl(&"pair"), None);
        assert!(cache.is_empty(), "expired entry should be evicted on read");
    }

    #[test]
    fn ttl_reports_absolute_expiry() {
        let cache = TtlCache::new();
        let before = Utc::now();
        cache.set("pair", (), Duration::from_secs(600));
        let after = Utc::now();

        let expiry = cache.ttl(&"pair").expect("entry should be live");
        assert!(expiry >= before + TimeDelta::seconds(600), "expiry too early");
        assert!(expiry <= after + TimeDelta::seconds(600), "expiry too late");
    }

    #[test]
    fn set_overwrites_value_and_expiry() {
        let cache = TtlCache::new();
        cache.set("pair", 1_u32, Duration::ZERO);
        cache.set("pair", 2_u32, Duration::from_secs(60));

        assert_eq!(cache.get(&"pair"), Some(2));
    }

    #[test]
    fn clones_share_entries() {
        let cache = TtlCache::new();
        let handle = cache.clone();
        cache.set("pair", 1_u32, Duration::from_secs(60));

        assert_eq!(handle.get(&"pair"), Some(1));
        assert_eq!(handle.remove(&"pair"), Some(1));
        assert_eq!(cache.get(&"pair"), None);
    }

    #[test]
    fn purge_expired_keeps_live_entries() {
        let cache = TtlCache::new();
        cache.set("stale", 1_u32, Duration::ZERO);
        cache.set("fresh", 2_u32, Duration::from_secs(60));

        cache.purge_expired();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"fresh"), Some(2));
    }

    #[test]
    fn huge_ttl_saturates() {
        let cache = TtlCache::new();
        cache.set("pair", 1_u32, Duration::MAX);

        assert_eq!(cache.ttl(&"pair"), Some(DateTime::<Utc>::MAX_UTC));
    }
}
