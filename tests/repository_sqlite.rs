mod common;

use shortener::domain::entities::UrlRecord;
use shortener::domain::repositories::{AliasReuse, CounterStore, StoreError, UrlStore};
use shortener::infrastructure::persistence::{SqliteCounterStore, SqliteUrlStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_save_and_get() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    store
        .save(&UrlRecord::new("abc", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(store.get("abc").await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    assert!(matches!(store.get("nope").await, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_duplicate_alias_is_conflict() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    store
        .save(&UrlRecord::new("abc", "https://one.example"))
        .await
        .unwrap();
    let result = store.save(&UrlRecord::new("abc", "https://two.example")).await;

    assert!(matches!(result, Err(StoreError::AliasConflict)));
    assert_eq!(store.get("abc").await.unwrap(), "https://one.example");
}

#[tokio::test]
async fn test_aliases_are_case_sensitive() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    store
        .save(&UrlRecord::new("Abc", "https://upper.example"))
        .await
        .unwrap();
    store
        .save(&UrlRecord::new("abc", "https://lower.example"))
        .await
        .unwrap();

    assert_eq!(store.get("Abc").await.unwrap(), "https://upper.example");
    assert_eq!(store.get("abc").await.unwrap(), "https://lower.example");
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    assert!(matches!(store.delete("nope").await, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_retired_alias_is_hidden_but_kept() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Retire).await;

    store
        .save(&UrlRecord::new("gone", "https://example.com"))
        .await
        .unwrap();
    store.delete("gone").await.unwrap();

    assert!(matches!(store.get("gone").await, Err(StoreError::NotFound)));
    assert!(matches!(store.delete("gone").await, Err(StoreError::NotFound)));
    assert!(matches!(
        store.save(&UrlRecord::new("gone", "https://again.example")).await,
        Err(StoreError::AliasConflict)
    ));
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.db");
    let path = path.to_str().unwrap();

    let store = SqliteUrlStore::connect(path, 2, AliasReuse::Allow)
        .await
        .unwrap();
    store
        .save(&UrlRecord::new("keep", "https://example.com"))
        .await
        .unwrap();
    store.close().await;

    let reopened = SqliteUrlStore::connect(path, 2, AliasReuse::Allow)
        .await
        .unwrap();
    assert_eq!(reopened.get("keep").await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_health_check_fails_after_close() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;

    assert!(store.health_check().await);

    store.close().await;

    assert!(!store.health_check().await);
    assert!(matches!(
        store.get("abc").await,
        Err(StoreError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_counter_starts_at_one_and_increments() {
    let dir = TempDir::new().unwrap();
    let counter = SqliteCounterStore::connect(&common::sqlite_url(&dir, "counter.db"), 2)
        .await
        .unwrap();

    assert_eq!(counter.increment().await.unwrap(), 1);
    assert_eq!(counter.increment().await.unwrap(), 2);
    assert_eq!(counter.increment().await.unwrap(), 3);
}
