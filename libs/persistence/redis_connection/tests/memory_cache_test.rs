use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use redis_connection::{
    CacheBackend, CacheExt, CacheTrait, MemoryCache, config::MemoryConfig,
};

fn cache<T: Clone + Send + Sync + 'static>() -> MemoryCache<T> {
    MemoryCache::new(MemoryConfig {
        capacity: 100,
        ttl_secs: 60,
    })
}

#[tokio::test]
async fn set_then_get_returns_value() {
    let cache = cache::<String>();

    cache.set("greeting", &"hello".to_string()).await.unwrap();

    assert_eq!(
        cache.try_get("greeting").await.unwrap().as_deref(),
        Some("hello")
    );
    assert!(cache.exists("greeting").await.unwrap());
}

#[tokio::test]
async fn remove_reports_presence() {
    let cache = cache::<u32>();
    cache.set("n", &1).await.unwrap();

    assert!(cache.remove("n").await.unwrap());
    assert!(!cache.remove("n").await.unwrap());
    assert_eq!(cache.try_get("n").await.unwrap(), None);
}

#[tokio::test]
async fn entries_expire_after_their_own_ttl() {
    let cache = cache::<u32>();
    cache
        .set_with_ttl("short", &1, Duration::from_millis(20))
        .await
        .unwrap();
    cache.set("long", &2).await.unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(cache.try_get("short").await.unwrap(), None);
    assert_eq!(cache.try_get("long").await.unwrap(), Some(2));
}

#[tokio::test]
async fn get_or_create_runs_factory_once() {
    let cache = cache::<Vec<u32>>();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = calls.clone();
        let value = cache
            .get_or_create("list", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, std::convert::Infallible>(vec![1, 2, 3])
            })
            .await
            .unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_or_create_caches_absent_results() {
    let cache = cache::<Option<u32>>();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..2 {
        let calls = calls.clone();
        let value = cache
            .get_or_create("missing", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, std::convert::Infallible>(None)
            })
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn get_or_create_does_not_cache_factory_errors() {
    let cache = cache::<u32>();

    let failed: Result<u32, &str> =
        cache.get_or_create("k", || async { Err("store down") }).await;
    assert_eq!(failed, Err("store down"));
    assert_eq!(cache.try_get("k").await.unwrap(), None);

    let value: Result<u32, &str> =
        cache.get_or_create("k", || async { Ok(5) }).await;
    assert_eq!(value, Ok(5));
}

#[tokio::test]
async fn get_or_create_works_through_trait_objects() {
    let cache: Arc<dyn CacheTrait<Value = u32>> = Arc::new(cache::<u32>());

    let value = cache
        .get_or_create("answer", || async {
            Ok::<_, std::convert::Infallible>(42)
        })
        .await
        .unwrap();

    assert_eq!(value, 42);
    assert_eq!(cache.try_get("answer").await.unwrap(), Some(42));
}

#[tokio::test]
async fn clear_drops_everything() {
    let cache = cache::<u32>();
    cache.set("a", &1).await.unwrap();
    cache.set("b", &2).await.unwrap();

    cache.clear().await.unwrap();

    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn memory_backend_builds_independent_caches() {
    let backend = CacheBackend::Memory(MemoryConfig::default());
    let numbers = backend.cache::<u32>();
    let words = backend.cache::<String>();

    numbers.set("k", &1).await.unwrap();

    assert_eq!(backend.name(), "memory");
    assert_eq!(words.try_get("k").await.unwrap(), None);
    assert_eq!(numbers.try_get("k").await.unwrap(), Some(1));
}
