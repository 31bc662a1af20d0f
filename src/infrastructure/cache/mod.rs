//! Process-wide TTL cache with background eviction.
//!
//! One cache instance is constructed at process start and shared by every
//! caller; entries carry an absolute expiration instant and are never
//! returned once expired, regardless of sweep timing. A background sweep
//! bounds memory growth from entries that are written but never re-read.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::domain::models::CacheConfig;

/// One cached value with its absolute expiration instant.
///
/// Owned exclusively by the cache; readers receive clones, never references.
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

struct CacheInner<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    enabled: bool,
    stopped: AtomicBool,
    stop_notify: Notify,
}

impl<V: Clone> CacheInner<V> {
    /// Delete every entry whose expiration has passed.
    async fn sweep(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = entries.len(), "cache sweep evicted entries");
        }
    }
}

/// A typed key/value store with per-entry time-to-live.
///
/// `set`, `get`, `delete` and `clear` are safe under arbitrary concurrent
/// invocation; the backing store is internally synchronized. When caching is
/// disabled every mutating operation is a no-op and every lookup misses.
pub struct TtlCache<V> {
    inner: Arc<CacheInner<V>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache and, if enabled, spawn its background sweep task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Arc::new(CacheInner {
            entries: RwLock::new(HashMap::new()),
            ttl: config.ttl(),
            enabled: config.enabled,
            stopped: AtomicBool::new(false),
            stop_notify: Notify::new(),
        });

        let sweeper = if config.enabled {
            let sweep_inner = inner.clone();
            let sweep_interval = config.sweep_interval();
            Some(tokio::spawn(async move {
                Self::sweep_loop(sweep_inner, sweep_interval).await;
            }))
        } else {
            None
        };

        Self {
            inner,
            sweeper: Mutex::new(sweeper),
        }
    }

    async fn sweep_loop(inner: Arc<CacheInner<V>>, sweep_interval: Duration) {
        let mut ticker = interval(sweep_interval);
        // The first tick of `interval` completes immediately; consume it so
        // the first real sweep happens one full interval after startup.
        ticker.tick().await;

        loop {
            if inner.stopped.load(Ordering::Acquire) {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    if inner.stopped.load(Ordering::Acquire) {
                        break;
                    }
                    inner.sweep().await;
                }
                () = inner.stop_notify.notified() => break,
            }
        }
    }

    /// Store `value` under `key` with expiration `now + ttl`.
    ///
    /// Overwrites any existing entry unconditionally (last-writer-wins).
    pub async fn set(&self, key: impl Into<String>, value: V) {
        if !self.inner.enabled {
            return;
        }
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.inner.ttl,
        };
        self.inner.entries.write().await.insert(key.into(), entry);
    }

    /// Look up `key`, returning the value only while it is unexpired.
    ///
    /// An expired entry is deleted as a side effect and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<V> {
        if !self.inner.enabled {
            return None;
        }

        {
            let entries = self.inner.entries.read().await;
            match entries.get(key) {
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // The entry was expired under the read lock. Re-check under the write
        // lock before evicting: a concurrent `set` may have replaced it.
        let mut entries = self.inner.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        None
    }

    /// Remove any entry for `key`; absent keys are not an error.
    pub async fn delete(&self, key: &str) {
        self.inner.entries.write().await.remove(key);
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        self.inner.entries.write().await.clear();
    }

    /// Number of entries currently stored.
    ///
    /// Includes entries that are logically expired but not yet swept, so the
    /// result is an upper bound on live entries.
    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    /// Whether the store holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }

    /// Stop the background sweep without clearing entries.
    ///
    /// Idempotent; awaits the sweep task so it cannot outlive the call.
    pub async fn stop(&self) {
        self.inner.stopped.store(true, Ordering::Release);
        // notify_one stores a permit, so the sweeper wakes even if it is not
        // parked on `notified()` at this exact moment.
        self.inner.stop_notify.notify_one();

        let handle = self.sweeper.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
