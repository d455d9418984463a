mod common;

use std::sync::Arc;
use std::time::Duration;

use shortener::domain::analytics_worker::{AnalyticsDispatcher, run_analytics_worker};
use shortener::domain::entities::{ClientInfo, ResolutionOutcome, ResolvedEvent};
use shortener::domain::repositories::AliasReuse;
use shortener::infrastructure::analytics::SqliteClickSink;
use shortener::infrastructure::persistence::open_sqlite_pool;

#[tokio::test]
async fn test_worker_persists_events_with_client_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::sqlite_url(&dir, "clicks.db");

    let sink = SqliteClickSink::connect(&path, 2).await.unwrap();
    let (dispatcher, rx) = AnalyticsDispatcher::channel(16);

    dispatcher.dispatch(
        ResolvedEvent::new("promo", Duration::from_millis(4), ResolutionOutcome::Hit).with_client(
            ClientInfo {
                user_agent: Some("curl/8.5".to_string()),
                ip: Some("203.0.113.7".to_string()),
                referrer: Some("https://news.example/".to_string()),
            },
        ),
    );
    dispatcher.dispatch(ResolvedEvent::new(
        "missing",
        Duration::from_millis(1),
        ResolutionOutcome::Error,
    ));
    drop(dispatcher);

    run_analytics_worker(rx, Arc::new(sink), Duration::from_secs(1)).await;

    let pool = open_sqlite_pool(&path, 1).await.unwrap();
    let rows: Vec<(String, String, Option<String>, Option<String>, Option<String>)> =
        sqlx::query_as(
            "SELECT alias, outcome, user_agent, ip, referrer FROM clicks ORDER BY id",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        (
            "promo".to_string(),
            "hit".to_string(),
            Some("curl/8.5".to_string()),
            Some("203.0.113.7".to_string()),
            Some("https://news.example/".to_string()),
        )
    );
    assert_eq!(rows[1].0, "missing");
    assert_eq!(rows[1].1, "error");
    assert_eq!(rows[1].2, None);
}

#[tokio::test]
async fn test_click_table_lives_next_to_urls() {
    let (dir, store) = common::sqlite_store(AliasReuse::Allow).await;
    drop(store);

    let path = common::sqlite_url(&dir, "storage.db");
    let sink = SqliteClickSink::connect(&path, 1).await.unwrap();
    let (dispatcher, rx) = AnalyticsDispatcher::channel(4);
    dispatcher.dispatch(ResolvedEvent::new("a", Duration::ZERO, ResolutionOutcome::Miss));
    drop(dispatcher);

    run_analytics_worker(rx, Arc::new(sink), Duration::from_secs(1)).await;

    let pool = open_sqlite_pool(&path, 1).await.unwrap();
    let (urls, clicks): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM urls), (SELECT COUNT(*) FROM clicks)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(urls, 0);
    assert_eq!(clicks, 1);
}
