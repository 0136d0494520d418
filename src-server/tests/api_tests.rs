//! HTTP-level tests over the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use feedtrack_core::store::InMemoryStore;
use feedtrack_core::targets::Target;
use feedtrack_core::transactions::{QuantityValue, TransactionRecord};
use feedtrack_server::main_lib::{app_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn seeded_store() -> Arc<InMemoryStore> {
    let targets = vec![Target {
        id: "t-mar".to_string(),
        subject_id: "emp-1".to_string(),
        month_key: "2024-03".to_string(),
        amount: 1000.0,
        created_at: None,
        updated_at: None,
    }];
    let orders = vec![
        TransactionRecord {
            id: Some("o1".to_string()),
            subject_id: Some("emp-1".to_string()),
            status: Some("completed".to_string()),
            created_at: Some("2024-03-04T09:00:00+00:00".to_string()),
            tons: Some(QuantityValue::Number(300.0)),
            ..Default::default()
        },
        TransactionRecord {
            id: Some("o2".to_string()),
            subject_id: Some("emp-1".to_string()),
            status: Some("Delivered".to_string()),
            created_at: Some("2024-03-21".to_string()),
            bags: Some(QuantityValue::Text("200".to_string())),
            ..Default::default()
        },
    ];
    Arc::new(InMemoryStore::with_data(targets, orders))
}

fn app(store: &Arc<InMemoryStore>) -> Router {
    app_router(Arc::new(AppState::with_store(store.clone())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_subject_progress_payload() {
    let store = seeded_store();

    let (status, body) = send(app(&store), get("/api/v1/subjects/emp-1/progress?year=2024")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subjectId"], "emp-1");
    assert_eq!(body["months"].as_array().unwrap().len(), 12);
    assert_eq!(body["months"][2], "2024-03");
    assert_eq!(body["targets"][2], 1000.0);
    assert_eq!(body["achieved"][2], 500.0);
    assert_eq!(body["monthlyPercentages"][2], 50.0);
    assert_eq!(body["completedOrders"][2], 2);
    assert_eq!(body["yearTotals"]["percentage"], 50.0);
    assert!(body["currentMonth"]["isAchieved"].is_boolean());
}

#[tokio::test]
async fn test_offline_store_returns_retryable_error() {
    let store = seeded_store();
    store.set_offline(true);

    let (status, body) = send(app(&store), get("/api/v1/subjects/emp-1/progress?year=2024")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "data_unavailable");
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_unknown_subject_gets_zero_state() {
    let store = seeded_store();

    let (status, body) = send(app(&store), get("/api/v1/subjects/emp-404/progress?year=2024")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["yearTotals"]["target"], 0.0);
    assert_eq!(body["yearTotals"]["percentage"], 0.0);
}

#[tokio::test]
async fn test_team_progress_requires_subjects() {
    let store = seeded_store();

    let (status, body) = send(app(&store), get("/api/v1/team/progress?year=2024")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["retryable"], false);

    let (status, body) = send(
        app(&store),
        get("/api/v1/team/progress?year=2024&subjects=emp-1,emp-2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"].as_array().unwrap().len(), 2);
    assert_eq!(body["combined"]["achieved"][2], 500.0);
}

#[tokio::test]
async fn test_target_lifecycle() {
    let store = seeded_store();

    let (status, created) = send(
        app(&store),
        with_json(
            "POST",
            "/api/v1/targets",
            json!({"subject_id": "emp-1", "month_key": "2024-04", "amount": 800.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, duplicate) = send(
        app(&store),
        with_json(
            "POST",
            "/api/v1/targets",
            json!({"subject_id": "emp-1", "month_key": "2024-04", "amount": 900.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(duplicate["code"], "duplicate_target");

    let (status, updated) = send(
        app(&store),
        with_json(
            "PUT",
            "/api/v1/targets",
            json!({"id": id, "subject_id": "emp-1", "month_key": "2024-04", "amount": 950.0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], 950.0);

    let (status, listed) = send(app(&store), get("/api/v1/subjects/emp-1/targets?year=2024")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/targets/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(&store), delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/targets/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&store), delete_again).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_invalid_target_is_bad_request() {
    let store = seeded_store();

    let (status, body) = send(
        app(&store),
        with_json(
            "POST",
            "/api/v1/targets",
            json!({"subject_id": "emp-1", "month_key": "April", "amount": 10.0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation");
}

#[tokio::test]
async fn test_out_of_range_year_is_rejected() {
    let store = seeded_store();

    let (status, body) = send(app(&store), get("/api/v1/subjects/emp-1/progress?year=20")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}
