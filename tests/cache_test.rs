use std::sync::Arc;
use std::time::Duration;

use newswire::domain::models::CacheConfig;
use newswire::TtlCache;

fn config(ttl_secs: u64, sweep_interval_secs: u64) -> CacheConfig {
    CacheConfig {
        enabled: true,
        ttl_secs,
        sweep_interval_secs,
    }
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let cache: TtlCache<String> = TtlCache::new(&config(1, 600));

    cache.set("k", "v".to_string()).await;
    assert_eq!(cache.get("k").await, Some("v".to_string()));

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // Expired on read even though the sweeper has not run yet.
    assert_eq!(cache.get("k").await, None);
    assert_eq!(cache.len().await, 0, "expired entry should be evicted on read");

    cache.stop().await;
}

#[tokio::test]
async fn test_background_sweep_evicts_unread_entries() {
    let cache: TtlCache<i64> = TtlCache::new(&config(1, 1));

    cache.set("a", 1).await;
    cache.set("b", 2).await;
    assert_eq!(cache.len().await, 2);

    // Never read the entries back; only the sweeper can remove them.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(cache.len().await, 0, "sweeper should have evicted expired entries");

    cache.stop().await;
}

#[tokio::test]
async fn test_disabled_cache_all_operations_noop() {
    let disabled = CacheConfig {
        enabled: false,
        ttl_secs: 60,
        sweep_interval_secs: 600,
    };
    let cache: TtlCache<String> = TtlCache::new(&disabled);

    cache.set("k", "v".to_string()).await;
    assert_eq!(cache.get("k").await, None);
    assert!(cache.is_empty().await);

    cache.delete("k").await;
    cache.clear().await;
    cache.stop().await;
}

#[tokio::test]
async fn test_clear_then_reuse() {
    let cache: TtlCache<i64> = TtlCache::new(&config(60, 600));

    cache.set("a", 1).await;
    cache.clear().await;
    assert!(cache.is_empty().await);

    // The cache stays usable after clear.
    cache.set("b", 2).await;
    assert_eq!(cache.get("b").await, Some(2));

    cache.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_and_writers() {
    let cache: Arc<TtlCache<u64>> = Arc::new(TtlCache::new(&config(60, 600)));

    let mut handles = Vec::new();
    for task in 0..100u64 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for op in 0..100u64 {
                let key = format!("key-{}", op % 10);
                match op % 4 {
                    0 => cache.set(key, task * 1000 + op).await,
                    1 | 2 => {
                        let _ = cache.get(&key).await;
                    }
                    _ => cache.delete(&key).await,
                }
            }
            // One key no other task touches.
            cache.set(format!("task-{task}"), task).await;
        }));
    }

    for handle in handles {
        handle.await.expect("cache task should not panic");
    }

    // Contention on the shared keys must not lose unrelated entries.
    for task in 0..100u64 {
        assert_eq!(
            cache.get(&format!("task-{task}")).await,
            Some(task),
            "entry for task {task} was lost"
        );
    }

    cache.stop().await;
}

#[tokio::test]
async fn test_overwrite_refreshes_expiration() {
    let cache: TtlCache<i64> = TtlCache::new(&config(1, 600));

    cache.set("k", 1).await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    // Re-setting restarts the entry's TTL from now.
    cache.set("k", 2).await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(cache.get("k").await, Some(2));

    cache.stop().await;
}
