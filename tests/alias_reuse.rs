mod common;

use common::{MemoryCache, deadline};
use shortener::application::services::ShortenerError;
use shortener::domain::repositories::AliasReuse;
use std::sync::Arc;

#[tokio::test]
async fn test_reuse_allows_saving_deleted_alias_again() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    let (service, _rx) = common::create_service(store, Arc::new(MemoryCache::new()));

    service
        .save(deadline(), "https://old.example", Some("promo"))
        .await
        .unwrap();
    service.delete(deadline(), "promo").await.unwrap();

    service
        .save(deadline(), "https://new.example", Some("promo"))
        .await
        .unwrap();

    assert_eq!(
        service.resolve(deadline(), "promo").await.unwrap(),
        "https://new.example"
    );
}

#[tokio::test]
async fn test_retire_rejects_saving_deleted_alias() {
    let (_dir, store) = common::sqlite_store(AliasReuse::Retire).await;
    let (service, _rx) = common::create_service(store, Arc::new(MemoryCache::new()));

    service
        .save(deadline(), "https://old.example", Some("promo"))
        .await
        .unwrap();
    service.delete(deadline(), "promo").await.unwrap();

    let again = service
        .save(deadline(), "https://new.example", Some("promo"))
        .await;
    assert!(matches!(again, Err(ShortenerError::AliasConflict { .. })));

    assert!(matches!(
        service.resolve(deadline(), "promo").await,
        Err(ShortenerError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(deadline(), "promo").await,
        Err(ShortenerError::NotFound { .. })
    ));
}
