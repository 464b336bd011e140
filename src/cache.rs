use lru::LruCache;
use std::{
    fmt::Display,
    hash::Hash,
    num::NonZeroUsize,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use crate::models::{Gender, Occasion, OutfitQuery, ToneProfile};

/// Entries kept when no capacity is configured
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Key for a memoized outfit ranking.
///
/// Built from resolved values, so hints that rank identically share an
/// entry: any unrecognized tone is Neutral, any unrecognized gender or
/// occasion is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutfitCacheKey {
    pub gender: Option<Gender>,
    pub tone: ToneProfile,
    pub occasion: Option<Occasion>,
    pub count: usize,
}

impl From<&OutfitQuery> for OutfitCacheKey {
    fn from(query: &OutfitQuery) -> Self {
        Self {
            gender: Gender::from_hint(&query.gender),
            tone: ToneProfile::from_hint(&query.skin_tone),
            occasion: Occasion::from_hint(&query.occasion),
            count: query.count,
        }
    }
}

impl Display for OutfitCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gender = self.gender.map_or("any", |g| g.as_str());
        let occasion = self.occasion.map_or("unknown", |o| o.as_str());
        write!(
            f,
            "outfits:{}:{}:{}:{}",
            gender, self.tone, occasion, self.count
        )
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Bounded in-process memoization with lazy TTL expiry.
///
/// Stale entries are dropped when a read finds them; the least recently used
/// entry is dropped when the cache is full. The lock is never held while
/// computing, so two concurrent misses on one key may both compute and the
/// later insert wins.
pub struct ResponseCache<K: Hash + Eq, V> {
    ttl: Duration,
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cap()
            .get()
    }

    /// Returns the live value for `key`, or computes and stores it
    pub fn get_or_compute<F>(&self, key: &K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_compute_with_ttl(key, self.ttl, compute)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute) with a per-call TTL
    pub fn get_or_compute_with_ttl<F>(&self, key: &K, ttl: Duration, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_compute_at(key, ttl, Instant::now(), compute)
    }

    fn get_or_compute_at<F>(&self, key: &K, ttl: Duration, now: Instant, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.lookup(key, ttl, now) {
            tracing::debug!(key = %key, "Cache hit");
            return value;
        }

        tracing::debug!(key = %key, "Cache miss");
        let value = compute();
        self.store(key.clone(), value.clone(), now);
        value
    }

    fn lookup(&self, key: &K, ttl: Duration, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let entry = entries.get(key)?;
        if now.saturating_duration_since(entry.inserted_at) <= ttl {
            return Some(entry.value.clone());
        }

        tracing::debug!(key = %key, "Evicting stale cache entry");
        entries.pop(key);
        None
    }

    fn store(&self, key: K, value: V, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((evicted, _)) = entries.push(
            key.clone(),
            CacheEntry {
                value,
                inserted_at: now,
            },
        ) {
            if evicted != key {
                tracing::debug!(key = %evicted, "Cache full, evicted least recently used");
            }
        }
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
