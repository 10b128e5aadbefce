//! Bounded memo of encoder output.
//!
//! Keys are normalized text, so inputs differing only in case or whitespace
//! share one entry. Eviction is least-recently-used: a hit refreshes the
//! entry, and inserting into a full cache drops the stalest one.

use crate::domain::ports::text_encoder::TextEncoder;
use crate::domain::values::vector::Vector;
use crate::infrastructure::encoding::trigram::normalize_text;
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Cache counters for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub capacity: usize,
    pub size: usize,
}

impl CacheStats {
    /// Hit rate in [0.0, 1.0]; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

struct CacheState {
    entries: LruCache<String, Arc<Vector>>,
    stats: CacheStats,
}

pub struct VectorCache {
    encoder: Arc<dyn TextEncoder>,
    state: Mutex<CacheState>,
}

impl VectorCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(encoder: Arc<dyn TextEncoder>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            encoder,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                stats: CacheStats {
                    capacity: capacity.get(),
                    ..Default::default()
                },
            }),
        }
    }

    /// Entries are immutable once inserted, so a poisoned lock still guards
    /// consistent data.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached vector for `text`, encoding it on a miss. The result always
    /// equals `encoder.encode(text)`.
    pub fn get_or_compute(&self, text: &str) -> Arc<Vector> {
        let key = normalize_text(text);

        {
            let mut state = self.lock();
            if let Some(vector) = state.entries.get(&key).cloned() {
                state.stats.hits += 1;
                return vector;
            }
            state.stats.misses += 1;
        }

        // Encode outside the lock; a concurrent miss on the same key computes
        // the same vector and simply overwrites it.
        let vector = Arc::new(self.encoder.encode(&key));
        trace!(chars = key.chars().count(), "vector cache miss");

        let mut state = self.lock();
        if let Some((evicted, _)) = state.entries.push(key.clone(), vector.clone()) {
            if evicted != key {
                state.stats.evictions += 1;
            }
        }
        state.stats.size = state.entries.len();
        vector
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lock().entries.contains(&normalize_text(text))
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    /// Drop all entries. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.stats.size = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::encoding::trigram::TrigramEncoder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEncoder {
        inner: TrigramEncoder,
        calls: AtomicUsize,
    }

    impl TextEncoder for CountingEncoder {
        fn encode(&self, text: &str) -> Vector {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.encode(text)
        }
        fn dimension(&self) -> usize {
            self.inner.dimension()
        }
        fn name(&self) -> &str {
            "counting"
        }
    }

    fn counting_cache(capacity: usize) -> (Arc<CountingEncoder>, VectorCache) {
        let encoder = Arc::new(CountingEncoder {
            inner: TrigramEncoder::default(),
            calls: AtomicUsize::new(0),
        });
        let cache = VectorCache::new(encoder.clone(), capacity);
        (encoder, cache)
    }

    #[test]
    fn test_hit_skips_encoder() {
        let (encoder, cache) = counting_cache(8);
        let first = cache.get_or_compute("hello there");
        let second = cache.get_or_compute("hello there");
        assert_eq!(first, second);
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_matches_direct_encoding() {
        let (_, cache) = counting_cache(2);
        let direct = TrigramEncoder::default();
        for text in ["one sample", "two sample", "three sample", "one sample", ""] {
            assert_eq!(*cache.get_or_compute(text), direct.encode(text));
        }
    }

    #[test]
    fn test_key_is_normalized() {
        let (encoder, cache) = counting_cache(8);
        cache.get_or_compute("Hello   There");
        cache.get_or_compute("hello there");
        assert_eq!(encoder.calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains("HELLO THERE"));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let (_, cache) = counting_cache(2);
        cache.get_or_compute("alpha text");
        cache.get_or_compute("beta text");
        // Touch alpha so beta becomes the eviction candidate.
        cache.get_or_compute("alpha text");
        cache.get_or_compute("gamma text");

        assert!(cache.contains("alpha text"));
        assert!(!cache.contains("beta text"));
        assert!(cache.contains("gamma text"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let (_, cache) = counting_cache(0);
        cache.get_or_compute("first text");
        cache.get_or_compute("second text");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().capacity, 1);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let (_, cache) = counting_cache(4);
        cache.get_or_compute("some text");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().size, 0);
    }
}
