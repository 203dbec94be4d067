//! Integration tests for the fetch lifecycle: load, fail, retry, refresh.
//!
//! Each test starts its own wiremock server and drives an `App` through the
//! same channel the TUI uses, so results are applied exactly as they would be
//! in the event loop.

use aisle::api::{
    CategoryClient, FailureReason, FetchResult, ImageStatus, MSG_NETWORK, MSG_TIMEOUT,
    MSG_UNKNOWN, PLACEHOLDER_IMAGE,
};
use aisle::app::{App, AppEvent};
use aisle::state::{Phase, ViewMode};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn category_json(id: i64, name: &str, image: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase(),
        "image": image,
        "creationAt": "2023-01-15T10:30:00.000Z",
        "updatedAt": "2023-01-15T10:30:00.000Z"
    })
}

fn app_for(server: &MockServer, timeout: Duration) -> App {
    let client = CategoryClient::new(&format!("{}/api/v1", server.uri()), timeout).unwrap();
    App::new(client, ViewMode::Table)
}

/// Wait for the next fetch result and apply it. Returns whether it was current.
async fn settle_next(
    app: &mut App,
    rx: &mut mpsc::Receiver<AppEvent>,
    tx: &mpsc::Sender<AppEvent>,
) -> bool {
    loop {
        match tokio::time::timeout(Duration::from_secs(10), rx.recv()).await {
            Ok(Some(AppEvent::CategoriesFetched { generation, result })) => {
                return app.apply_fetch(generation, result, tx);
            }
            Ok(Some(AppEvent::ImageProbed {
                generation,
                category_id,
                status,
            })) => {
                app.apply_image_status(generation, category_id, status);
            }
            Ok(Some(other)) => panic!("unexpected event: {:?}", other),
            Ok(None) => panic!("channel closed"),
            Err(_) => panic!("no fetch result within 10s"),
        }
    }
}

// ============================================================================
// Fetch outcomes
// ============================================================================

#[tokio::test]
async fn test_successful_load_preserves_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            category_json(3, "Shoes", ""),
            category_json(1, "Clothes", ""),
            category_json(2, "Electronics", ""),
        ])))
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);

    app.load(&tx);
    assert_eq!(app.state.phase(), Phase::Loading);
    assert!(settle_next(&mut app, &mut rx, &tx).await);

    assert_eq!(app.state.phase(), Phase::Loaded);
    let ids: Vec<i64> = app.state.filtered_categories().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_server_error_keeps_categories_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([category_json(1, "Clothes", "")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);

    app.load(&tx);
    settle_next(&mut app, &mut rx, &tx).await;
    assert_eq!(app.state.categories.len(), 1);

    app.refresh(&tx);
    settle_next(&mut app, &mut rx, &tx).await;

    assert!(!app.state.loading);
    assert_eq!(app.state.categories.len(), 1);
    match app.state.phase() {
        Phase::Failed(msg) => {
            assert_eq!(msg, "Server error: 500 - Internal Server Error");
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_classified_before_anything_else() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client =
        CategoryClient::new(&format!("{}/api/v1", server.uri()), Duration::from_millis(300))
            .unwrap();
    match client.fetch_categories().await {
        FetchResult::Failure { reason, message } => {
            assert_eq!(reason, FailureReason::Timeout);
            assert_eq!(message, MSG_TIMEOUT);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = CategoryClient::new(
        &format!("http://127.0.0.1:{}/api/v1", port),
        Duration::from_secs(5),
    )
    .unwrap();
    match client.fetch_categories().await {
        FetchResult::Failure { reason, message } => {
            assert_eq!(reason, FailureReason::NetworkError);
            assert_eq!(message, MSG_NETWORK);
        }
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_unknown_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);
    app.load(&tx);
    settle_next(&mut app, &mut rx, &tx).await;

    assert_eq!(app.state.phase(), Phase::Failed(MSG_UNKNOWN));
    assert!(app.state.categories.is_empty());
}

// ============================================================================
// Retry and last-request-wins
// ============================================================================

#[tokio::test]
async fn test_retry_counts_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([category_json(1, "Shoes", "")])),
        )
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);

    app.load(&tx);
    settle_next(&mut app, &mut rx, &tx).await;
    assert_eq!(app.retry_label(), "Retry");

    app.retry(&tx);
    assert_eq!(app.state.phase(), Phase::Loading);
    settle_next(&mut app, &mut rx, &tx).await;
    assert_eq!(app.retry_label(), "Retry (1)");
    assert!(matches!(app.state.phase(), Phase::Failed(m) if m.contains("503")));

    app.retry(&tx);
    settle_next(&mut app, &mut rx, &tx).await;
    assert_eq!(app.state.phase(), Phase::Loaded);
    assert_eq!(app.retry_count, 0);
}

#[tokio::test]
async fn test_last_request_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([category_json(1, "Old", "")]))
                .set_delay(Duration::from_millis(500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([category_json(2, "New", "")])),
        )
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);

    app.load(&tx);
    // Let the first request reach the server before superseding it
    tokio::time::sleep(Duration::from_millis(100)).await;
    app.retry(&tx);

    while !settle_next(&mut app, &mut rx, &tx).await {}

    assert_eq!(app.state.categories.len(), 1);
    assert_eq!(app.state.categories[0].name, "New");

    // Nothing from the aborted fetch arrives afterwards
    tokio::time::sleep(Duration::from_millis(600)).await;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::CategoriesFetched { generation, result } = event {
            assert!(!app.apply_fetch(generation, result, &tx));
        }
    }
    assert_eq!(app.state.categories[0].name, "New");
}

// ============================================================================
// Image fallback
// ============================================================================

#[tokio::test]
async fn test_broken_image_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    let ok = format!("{}/img/ok.png", server.uri());
    let broken = format!("{}/img/broken.png", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            category_json(1, "Clothes", &ok),
            category_json(2, "Shoes", &broken),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/ok.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 16]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/broken.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut app = app_for(&server, Duration::from_secs(5));
    let (tx, mut rx) = mpsc::channel(64);
    app.load(&tx);
    settle_next(&mut app, &mut rx, &tx).await;

    let mut pending = 2;
    while pending > 0 {
        match tokio::time::timeout(Duration::from_secs(10), rx.recv()).await {
            Ok(Some(AppEvent::ImageProbed {
                generation,
                category_id,
                status,
            })) => {
                assert!(app.apply_image_status(generation, category_id, status));
                pending -= 1;
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    let clothes = app.state.categories[0].clone();
    let shoes = app.state.categories[1].clone();
    assert_eq!(app.image_status_for(1), ImageStatus::Loaded);
    assert_eq!(app.image_src(&clothes), ok);
    assert_eq!(app.image_status_for(2), ImageStatus::Failed);
    assert_eq!(app.image_src(&shoes), PLACEHOLDER_IMAGE);
}
