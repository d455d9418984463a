mod common;

use common::{FailingCache, MemoryCache, deadline};
use shortener::application::services::ShortenerError;
use shortener::domain::entities::ResolutionOutcome;
use shortener::domain::repositories::{AliasReuse, UrlStore};
use shortener::infrastructure::cache::{NullCache, UrlCache};
use std::sync::Arc;

#[tokio::test]
async fn test_save_resolve_delete_scenario() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let (service, _rx) = common::create_service(store, Arc::new(MemoryCache::new()));

    let alias = service
        .save(deadline(), "https://example.com", Some(""))
        .await
        .unwrap();
    assert!(!alias.is_empty());

    let target = service.resolve(deadline(), &alias).await.unwrap();
    assert_eq!(target, "https://example.com");

    service.delete(deadline(), &alias).await.unwrap();

    let second = service.delete(deadline(), &alias).await;
    assert!(matches!(second, Err(ShortenerError::NotFound { .. })));

    let resolved = service.resolve(deadline(), &alias).await;
    assert!(matches!(resolved, Err(ShortenerError::NotFound { .. })));
}

#[tokio::test]
async fn test_save_then_resolve_with_and_without_cache() {
    let caches: Vec<Arc<dyn UrlCache>> = vec![
        Arc::new(MemoryCache::new()),
        Arc::new(NullCache::new()),
        Arc::new(FailingCache),
    ];

    for cache in caches {
        let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
        let (service, _rx) = common::create_service(store, cache);

        let alias = service
            .save(deadline(), "https://example.com/page", Some("page"))
            .await
            .unwrap();
        assert_eq!(alias, "page");

        let target = service.resolve(deadline(), "page").await.unwrap();
        assert_eq!(target, "https://example.com/page");
    }
}

#[tokio::test]
async fn test_duplicate_save_conflicts_and_keeps_first_target() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let (service, _rx) = common::create_service(store, Arc::new(MemoryCache::new()));

    service
        .save(deadline(), "https://first.example", Some("dup"))
        .await
        .unwrap();

    let second = service
        .save(deadline(), "https://second.example", Some("dup"))
        .await;
    match second {
        Err(ShortenerError::AliasConflict { alias }) => assert_eq!(alias, "dup"),
        other => panic!("expected conflict, got {:?}", other),
    }

    let target = service.resolve(deadline(), "dup").await.unwrap();
    assert_eq!(target, "https://first.example");
}

#[tokio::test]
async fn test_delete_of_unknown_alias_is_not_found() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let (service, _rx) = common::create_service(store, Arc::new(MemoryCache::new()));

    let result = service.delete(deadline(), "never-saved").await;

    assert!(matches!(result, Err(ShortenerError::NotFound { .. })));
}

#[tokio::test]
async fn test_failing_cache_changes_no_outcome() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let (service, _rx) = common::create_service(store, Arc::new(FailingCache));

    let alias = service
        .save(deadline(), "https://example.com", None)
        .await
        .unwrap();
    assert_eq!(
        service.resolve(deadline(), &alias).await.unwrap(),
        "https://example.com"
    );

    let conflict = service
        .save(deadline(), "https://other.example", Some(alias.as_str()))
        .await;
    assert!(matches!(conflict, Err(ShortenerError::AliasConflict { .. })));

    service.delete(deadline(), &alias).await.unwrap();
    assert!(matches!(
        service.resolve(deadline(), &alias).await,
        Err(ShortenerError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(deadline(), &alias).await,
        Err(ShortenerError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_save_warms_cache_and_delete_evicts_it() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let cache = Arc::new(MemoryCache::new());
    let (service, _rx) = common::create_service(store, cache.clone());

    service
        .save(deadline(), "https://example.com", Some("warm"))
        .await
        .unwrap();
    assert!(cache.contains("warm"));

    service.delete(deadline(), "warm").await.unwrap();
    assert!(!cache.contains("warm"));
}

#[tokio::test]
async fn test_resolution_events_report_outcome() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let cache = Arc::new(MemoryCache::new());

    // Written straight to the store so that the first lookup misses the cache.
    store
        .save(&shortener::domain::entities::UrlRecord::new(
            "evt",
            "https://example.com",
        ))
        .await
        .unwrap();

    let (service, mut rx) = common::create_service(store, cache);

    service.resolve(deadline(), "evt").await.unwrap();
    service.resolve(deadline(), "evt").await.unwrap();
    let _ = service.resolve(deadline(), "missing").await;

    let outcomes: Vec<_> = (0..3)
        .map(|_| {
            let event = rx.try_recv().unwrap();
            (event.alias, event.outcome)
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            ("evt".to_string(), ResolutionOutcome::Miss),
            ("evt".to_string(), ResolutionOutcome::Hit),
            ("missing".to_string(), ResolutionOutcome::Error),
        ]
    );
}

#[tokio::test]
async fn test_stale_cache_entry_is_served_until_evicted() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let cache = Arc::new(MemoryCache::new());
    let (service, _rx) = common::create_service(store.clone(), cache.clone());

    service
        .save(deadline(), "https://example.com", Some("stale"))
        .await
        .unwrap();

    // Another process deleted the record without touching this cache.
    store.delete("stale").await.unwrap();

    assert_eq!(
        service.resolve(deadline(), "stale").await.unwrap(),
        "https://example.com"
    );
}
