//! Route resolution caching.
//!
//! [`ResolveCache`] memoizes the outcome of
//! [`RouteTable::resolve`](crate::RouteTable::resolve) per normalized path,
//! so re-rendering the same location does not re-run every matcher. It is
//! gated behind the `cache` feature and uses the [`lru`] crate.
//!
//! Because a built table never changes, entries stay valid for the table's
//! lifetime; [`clear`](ResolveCache::clear) exists for callers that want to
//! bound memory explicitly.
//!
//! # Examples
//!
//! ```
//! use switchyard::cache::{CachedResolution, ResolveCache};
//! use switchyard::{ResolveTarget, RouteParams};
//!
//! let mut cache = ResolveCache::new();
//! cache.insert(
//!     "/planets".to_string(),
//!     CachedResolution { target: ResolveTarget::Entry(1), params: RouteParams::new() },
//! );
//!
//! assert!(cache.get("/planets").is_some());
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::table::ResolveTarget;
use crate::{debug_log, trace_log, RouteParams};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cached outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResolution {
    /// Which handler won.
    pub target: ResolveTarget,
    /// Parameters captured by the winning entry.
    pub params: RouteParams,
}

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that missed.
    pub misses: usize,
    /// Number of full invalidations (via [`ResolveCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of resolution results keyed by normalized path.
#[derive(Debug)]
pub struct ResolveCache {
    entries: LruCache<String, CachedResolution>,
    stats: CacheStats,
}

impl ResolveCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(crate::RouterConfig::DEFAULT_CACHE_CAPACITY)
    }

    /// Create a cache holding at most `capacity` paths (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a path. Updates hit/miss stats.
    pub fn get(&mut self, path: &str) -> Option<CachedResolution> {
        if let Some(entry) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("Resolve cache hit for '{}'", path);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Resolve cache miss for '{}'", path);
            None
        }
    }

    /// Store the resolution for a path, evicting the least recently used
    /// entry when full.
    pub fn insert(&mut self, path: String, resolution: CachedResolution) {
        trace_log!("Caching {:?} for '{}'", resolution.target, path);
        self.entries.push(path, resolution);
    }

    /// Drop every entry and increment the invalidation counter.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Resolve cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Return a reference to the current cache statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters in [`CacheStats`] to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached paths.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for ResolveCache {
    fn default() -> Self {
        Self::new()
    }
}
