//! Metrics sink port.
//!
//! The cache itself emits nothing; its consumers (the service layer) record
//! hits and misses around `get` calls and may poll the cache size as a gauge.

/// Sink for cache-related metrics.
pub trait MetricsSink: Send + Sync {
    /// Record a cache hit.
    fn record_cache_hit(&self);

    /// Record a cache miss.
    fn record_cache_miss(&self);

    /// Report the current number of stored entries.
    fn record_cache_size(&self, size: usize);
}

/// A no-op metrics sink.
///
/// Use this when metrics collection is disabled or not needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMetrics;

impl NullMetrics {
    /// Create a new no-op sink.
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for NullMetrics {
    fn record_cache_hit(&self) {}

    fn record_cache_miss(&self) {}

    fn record_cache_size(&self, _size: usize) {}
}
