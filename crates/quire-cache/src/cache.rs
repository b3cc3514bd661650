//! Bounded, insertion-ordered store of rendered cells.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use quire_config::CacheSettings;
use quire_highlight::Segment;
use tracing::{debug, trace};

use crate::CacheKey;

/// Entries kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Share of the newest entries that survive an eviction pass.
pub const DEFAULT_RETAIN_RATIO: f64 = 0.6;

/// Cache of annotated cells.
///
/// Entries are kept in insertion order. When a new key arrives while the cache
/// is full, the oldest entries are dropped in one pass so that only the newest
/// `floor(capacity * retain_ratio)` remain, then the new entry is added. The
/// cache is safe to share between threads behind an [`Arc`].
#[derive(Debug)]
pub struct AnnotationCache {
    /// Cached segments, oldest first.
    entries: Mutex<IndexMap<CacheKey, Arc<[Segment]>>>,
    /// Maximum number of entries.
    capacity: usize,
    /// Entries kept by an eviction pass.
    retain: usize,
}

impl Default for AnnotationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationCache {
    /// Creates a cache with the default capacity and retain ratio.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_retain_ratio(capacity, DEFAULT_RETAIN_RATIO)
    }

    /// Creates a cache with an explicit retain ratio.
    ///
    /// A capacity of zero is raised to one. The number of retained entries is
    /// always below the capacity so an insert never overfills the cache.
    pub fn with_retain_ratio(capacity: usize, retain_ratio: f64) -> Self {
        let capacity = capacity.max(1);
        let retain = ((capacity as f64) * retain_ratio.clamp(0.0, 1.0)).floor() as usize;
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
            capacity,
            retain: retain.min(capacity - 1),
        }
    }

    /// Creates a cache from configured settings.
    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::with_retain_ratio(settings.capacity, settings.retain_ratio)
    }

    /// Looks up the segments stored under `key`.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<[Segment]>> {
        let entries = self.entries.lock();
        let hit = entries.get(key).cloned();
        trace!(%key, hit = hit.is_some(), "annotation cache lookup");
        hit
    }

    /// Stores `segments` under `key`.
    ///
    /// Replacing an existing key keeps its position in the eviction order.
    pub fn set(&self, key: CacheKey, segments: Arc<[Segment]>) {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get_mut(&key) {
            *existing = segments;
            return;
        }
        self.enforce_capacity(&mut entries);
        entries.insert(key, segments);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        debug!(dropped = entries.len(), "annotation cache cleared");
        entries.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops the oldest entries if the cache is full.
    fn enforce_capacity(&self, entries: &mut IndexMap<CacheKey, Arc<[Segment]>>) {
        if entries.len() < self.capacity {
            return;
        }
        let excess = entries.len() - self.retain;
        entries.drain(..excess);
        debug!(
            evicted = excess,
            retained = entries.len(),
            "annotation cache evicted oldest entries"
        );
    }
}
