//! In-process metrics registry.
//!
//! Counts cache hits and misses and tracks the cache-size gauge. Exposition
//! (Prometheus or otherwise) is out of scope; callers poll `snapshot`.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ports::MetricsSink;

/// Point-in-time view of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total cache hits recorded.
    pub cache_hits: u64,
    /// Total cache misses recorded.
    pub cache_misses: u64,
    /// Last reported cache entry count.
    pub cache_size: u64,
}

/// Atomic-counter implementation of the `MetricsSink` port.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_size: AtomicU64,
}

impl MetricsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read all counters at once.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_size: self.cache_size.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSink for MetricsRegistry {
    fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cache_size(&self, size: usize) {
        self.cache_size.store(size as u64, Ordering::Relaxed);
    }
}
