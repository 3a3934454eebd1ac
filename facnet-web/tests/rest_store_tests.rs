//! REST backend client tests against a local fake backend
//!
//! Tests cover:
//! - Query filters and auth headers sent for each operation
//! - Client-side exact name confirmation
//! - Error mapping for failed and unreachable backends

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use facnet_common::config::BackendConfig;
use facnet_common::models::NewCenter;
use facnet_common::ClientToken;
use facnet_web::store::{Asset, CenterStore, RestStore, StoreError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as seen by the fake backend
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: String,
}

#[derive(Clone, Default)]
struct FakeBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeBackend {
    fn last(&self) -> Recorded {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("Backend should have received a request")
    }
}

async fn handle(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> (StatusCode, Json<Value>) {
    let body = String::from_utf8_lossy(&body).into_owned();
    let path = uri.path().to_string();
    backend.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: query.clone(),
        headers,
        body: body.clone(),
    });

    match (method, path.as_str()) {
        (Method::GET, "/rest/v1/incubation_centers") if query.contains_key("company_name") => {
            if query["company_name"].contains("Green") {
                // Newest first; the first row is a wildcard hit, not an exact match
                (
                    StatusCode::OK,
                    Json(json!([
                        { "id": 6, "company_name": "Green Valley Hubs", "is_approved": true },
                        { "id": 5, "company_name": "green valley hub", "location": null, "is_approved": true }
                    ])),
                )
            } else {
                (StatusCode::OK, Json(json!([])))
            }
        }
        (Method::POST, "/rest/v1/incubation_centers") => {
            let rows: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let mut row = rows[0].clone();
            row["id"] = json!(11);
            row["created_at"] = json!("2024-05-01T00:00:00Z");
            (StatusCode::CREATED, Json(json!([row])))
        }
        (Method::DELETE, "/rest/v1/comments_incubation") => (StatusCode::OK, Json(json!([]))),
        (Method::GET, "/rest/v1/comments_incubation") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        ),
        (Method::POST, p) if p.starts_with("/storage/v1/object/") => {
            (StatusCode::OK, Json(json!({ "Key": p })))
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "no route" }))),
    }
}

/// Start the fake backend on an ephemeral port and return a client for it
async fn setup_backend() -> (FakeBackend, RestStore, String) {
    let backend = FakeBackend::default();
    let app = Router::new().fallback(handle).with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = BackendConfig {
        url: Some(format!("{}/", base_url)),
        anon_key: Some("test-key".to_string()),
        ..Default::default()
    };
    let store = RestStore::new(&config).unwrap();
    (backend, store, base_url)
}

#[tokio::test]
async fn test_find_by_name_filters_and_confirms_match() {
    let (backend, store, _) = setup_backend().await;

    let center = store
        .find_approved_center_by_name("Green Valley Hub")
        .await
        .unwrap()
        .expect("Exact match should be found");
    assert_eq!(center.id, 5);
    assert_eq!(center.location, "");

    let request = backend.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.query["company_name"], "ilike.Green Valley Hub");
    assert_eq!(request.query["is_approved"], "eq.true");
    assert_eq!(request.query["order"], "created_at.desc");
    assert_eq!(request.headers["apikey"], "test-key");
    assert_eq!(request.headers["authorization"], "Bearer test-key");
}

#[tokio::test]
async fn test_find_by_name_escapes_wildcards() {
    let (backend, store, _) = setup_backend().await;

    let found = store.find_approved_center_by_name("100%_Labs").await.unwrap();
    assert!(found.is_none());
    assert_eq!(backend.last().query["company_name"], r"ilike.100\%\_Labs");
}

#[tokio::test]
async fn test_delete_filters_by_id_and_token() {
    let (backend, store, _) = setup_backend().await;
    let token = ClientToken::parse("alice-token").unwrap();

    let deleted = store.delete_comment(3, &token).await.unwrap();
    assert!(deleted.is_none());

    let request = backend.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.query["id"], "eq.3");
    assert_eq!(request.query["browser_session_id"], "eq.alice-token");
    assert_eq!(request.headers["prefer"], "return=representation");
}

#[tokio::test]
async fn test_insert_center_sends_pending_row() {
    let (backend, store, _) = setup_backend().await;
    let new_center = NewCenter::pending(
        "Harbor Labs".to_string(),
        "team@harborlabs.io".to_string(),
        "https://harborlabs.io".to_string(),
        "Founder-first support.".to_string(),
        "Incubation center".to_string(),
        "Porto".to_string(),
        "Climate Tech".to_string(),
        "Hybrid".to_string(),
        "40+".to_string(),
        "Equity based".to_string(),
        String::new(),
        "Climate program.".to_string(),
        Some("https://cdn.example/logos/1.png".to_string()),
    );

    let center = store.insert_center(new_center).await.unwrap();
    assert_eq!(center.id, 11);
    assert!(!center.is_approved);
    assert!(center.created_at.is_some());

    let request = backend.last();
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body[0]["is_approved"], false);
    assert_eq!(body[0]["company_name"], "Harbor Labs");
}

#[tokio::test]
async fn test_upload_returns_public_url() {
    let (backend, store, base_url) = setup_backend().await;

    let url = store
        .upload_asset(Asset {
            path: "logos/1.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        })
        .await
        .unwrap();
    assert_eq!(
        url,
        format!("{}/storage/v1/object/public/incubation-logos/logos/1.png", base_url)
    );

    let request = backend.last();
    assert_eq!(request.path, "/storage/v1/object/incubation-logos/logos/1.png");
    assert_eq!(request.headers["content-type"], "image/png");
}

#[tokio::test]
async fn test_backend_error_status() {
    let (_, store, _) = setup_backend().await;

    let err = store.list_comments(5).await.unwrap_err();
    assert!(matches!(err, StoreError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = BackendConfig {
        url: Some(format!("http://{}", addr)),
        ..Default::default()
    };
    let store = RestStore::new(&config).unwrap();

    let err = store.find_approved_centers().await.unwrap_err();
    assert!(matches!(err, StoreError::Network(_)));
}
