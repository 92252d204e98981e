//! Integration tests for the read API.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use nexus_domain::{Action, SignalEvent};
use nexus_projection::{InMemorySignalStore, SignalStore};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, InMemorySignalStore) {
    let store = InMemorySignalStore::new();
    let app = nexus_api::create_app(store.clone(), get_metrics_handle());
    (app, store)
}

fn created_event(id: &str, priority: &str, created_at: &str) -> SignalEvent {
    SignalEvent {
        action: Action::Created,
        id: id.to_string(),
        title: "Server Alert".to_string(),
        content: "CPU at 95%".to_string(),
        priority: priority.to_string(),
        author: "otavio".to_string(),
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

async fn seed_two_signals(store: &InMemorySignalStore) {
    store
        .apply(&created_event("s1", "High", "2026-02-23T15:00:00-03:00"))
        .await
        .unwrap();
    store
        .apply(&created_event("s2", "Low", "2026-02-22T10:00:00-03:00"))
        .await
        .unwrap();
}

async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|value| value.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, content_type, json)
}

#[tokio::test]
async fn list_signals_newest_first() {
    let (app, store) = setup();
    seed_two_signals(&store).await;

    let (status, content_type, json) = get_json(app, "/signals").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let signals = json.as_array().unwrap();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0]["id"], "s1");
    assert_eq!(signals[1]["id"], "s2");
}

#[tokio::test]
async fn list_signals_empty_view() {
    let (app, _store) = setup();

    let (status, _, json) = get_json(app, "/signals").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_signals_priority_filter_matches() {
    let (app, store) = setup();
    seed_two_signals(&store).await;

    let (status, _, json) = get_json(app, "/signals?priority=High").await;

    assert_eq!(status, StatusCode::OK);
    let signals = json.as_array().unwrap();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0]["id"], "s1");
}

#[tokio::test]
async fn list_signals_priority_filter_no_match() {
    let (app, store) = setup();
    store
        .apply(&created_event("s1", "High", "2026-02-23T15:00:00-03:00"))
        .await
        .unwrap();

    let (status, _, json) = get_json(app, "/signals?priority=Low").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn get_signal_by_id() {
    let (app, store) = setup();
    seed_two_signals(&store).await;

    let (status, content_type, json) = get_json(app, "/signals/s1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json["id"], "s1");
    assert_eq!(json["priority"], "High");
    assert_eq!(json["title"], "Server Alert");
}

#[tokio::test]
async fn get_missing_signal_is_404() {
    let (app, _store) = setup();

    let (status, _, json) = get_json(app, "/signals/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "signal not found");
}

#[tokio::test]
async fn deleted_signal_disappears_from_both_routes() {
    let (app, store) = setup();
    store
        .apply(&created_event("s1", "High", "2026-02-23T15:00:00-03:00"))
        .await
        .unwrap();
    store
        .apply(&SignalEvent {
            action: Action::Deleted,
            id: "s1".to_string(),
            ..SignalEvent::default()
        })
        .await
        .unwrap();

    let (status, _, json) = get_json(app.clone(), "/signals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 0);

    let (status, _, json) = get_json(app, "/signals/s1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "signal not found");
}

#[tokio::test]
async fn health_check() {
    let (app, _store) = setup();

    let (status, _, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let (app, _store) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
