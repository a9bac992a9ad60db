use std::time::Duration;

use redis_connection::{CacheExt, CacheTrait, RedisCache};
use serde::{Deserialize, Serialize};
use test_utils::TestRedisContainer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Snapshot {
    id: u32,
    label: String,
}

async fn setup() -> anyhow::Result<(TestRedisContainer, RedisCache<Snapshot>)>
{
    let container = TestRedisContainer::new().await?;
    let cache = RedisCache::new(container.pool.clone(), Duration::from_secs(60))
        .with_namespace(container.test_prefix.clone());
    Ok((container, cache))
}

#[tokio::test]
#[ignore = "requires docker"]
async fn redis_round_trips_json_values() {
    let (_container, cache) = setup().await.unwrap();
    let snapshot = Snapshot {
        id: 1,
        label: "one".into(),
    };

    cache.set("snap", &snapshot).await.unwrap();

    assert_eq!(cache.try_get("snap").await.unwrap(), Some(snapshot));
    assert!(cache.remove("snap").await.unwrap());
    assert_eq!(cache.try_get("snap").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn redis_get_or_create_populates_on_miss() {
    let (_container, cache) = setup().await.unwrap();

    let created = cache
        .get_or_create("lazy", || async {
            Ok::<_, std::convert::Infallible>(Snapshot {
                id: 2,
                label: "two".into(),
            })
        })
        .await
        .unwrap();

    assert_eq!(cache.try_get("lazy").await.unwrap(), Some(created));
}
