//! Integration tests for the remote key-value backend.
//!
//! These run against a small in-process mock of the REST contract
//! (`GET {base}/get/{key}`, `POST {base}/set/{key}`, bearer auth, stored
//! value wrapped in a `{"result": ...}` envelope) and exercise the lenient
//! load paths: a missing key, a malformed stored payload, and a wrongly
//! shaped envelope all degrade to "nothing loaded" rather than an error.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use popsync_core::backend::{RemoteBackend, StateBackend};
use popsync_core::{PopupState, PopupStore};

// ---------------------------------------------------------------------------
// Mock key-value endpoint
// ---------------------------------------------------------------------------

/// Shared handle onto the mock's stored value and recorded requests.
#[derive(Clone, Default)]
struct MockKv {
    /// The envelope's `result` value; `None` serializes as `null`
    /// (missing key). Tests may seed arbitrary shapes here.
    stored: Arc<Mutex<Option<Value>>>,
    /// Authorization header of the most recent request.
    last_auth: Arc<Mutex<Option<String>>>,
    /// Raw body of the most recent `set` request.
    last_set_body: Arc<Mutex<Option<String>>>,
}

fn record_auth(kv: &MockKv, headers: &HeaderMap) {
    *kv.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
}

async fn get_key(State(kv): State<MockKv>, headers: HeaderMap) -> Json<Value> {
    record_auth(&kv, &headers);
    let stored = kv.stored.lock().unwrap().clone();
    Json(json!({ "result": stored }))
}

async fn set_key(State(kv): State<MockKv>, headers: HeaderMap, body: String) -> Json<Value> {
    record_auth(&kv, &headers);
    *kv.last_set_body.lock().unwrap() = Some(body.clone());
    *kv.stored.lock().unwrap() = Some(Value::String(body));
    Json(json!({ "result": "OK" }))
}

/// Serve the mock on an ephemeral port and return a backend bound to it.
async fn start_mock() -> (MockKv, RemoteBackend) {
    let kv = MockKv::default();
    let app = Router::new()
        .route("/get/popup-state", get(get_key))
        .route("/set/popup-state", post(set_key))
        .with_state(kv.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (kv, RemoteBackend::new(format!("http://{addr}"), "test-token"))
}

// ---------------------------------------------------------------------------
// Lenient loads
// ---------------------------------------------------------------------------

/// An absent key comes back as `{"result": null}` and loads as nothing.
#[tokio::test]
async fn missing_key_loads_nothing() {
    let (_kv, backend) = start_mock().await;
    assert_eq!(backend.load().await, None);
}

/// A stored string that is not valid JSON falls back to nothing rather
/// than raising.
#[tokio::test]
async fn malformed_stored_payload_falls_back() {
    let (kv, backend) = start_mock().await;
    *kv.stored.lock().unwrap() = Some(Value::String("not json".to_string()));

    assert_eq!(backend.load().await, None);
}

/// A `result` that is not a string (wrong envelope shape) is treated the
/// same as a missing key.
#[tokio::test]
async fn non_string_result_is_treated_as_absent() {
    let (kv, backend) = start_mock().await;
    *kv.stored.lock().unwrap() = Some(json!(42));

    assert_eq!(backend.load().await, None);
}

/// Wrongly typed fields inside a well-formed stored record coerce to the
/// field defaults on load.
#[tokio::test]
async fn wrongly_typed_stored_fields_coerce_to_defaults() {
    let (kv, backend) = start_mock().await;
    *kv.stored.lock().unwrap() = Some(Value::String(
        r#"{"show": "yes", "content": 42}"#.to_string(),
    ));

    assert_eq!(backend.load().await, Some(PopupState::default()));
}

/// An unreachable endpoint degrades: loads yield nothing, saves surface
/// an error for callers that await durability.
#[tokio::test]
async fn unreachable_endpoint_degrades() {
    // Nothing listens on port 1.
    let backend = RemoteBackend::new("http://127.0.0.1:1", "tok");

    assert_eq!(backend.load().await, None);
    assert!(backend.save(&PopupState::default()).await.is_err());
}

// ---------------------------------------------------------------------------
// Saves and the string-encoded record
// ---------------------------------------------------------------------------

/// A save posts the full composite record (including the `updatedAt`
/// stamp) with the bearer token.
#[tokio::test]
async fn save_posts_the_full_record_with_bearer_auth() {
    let (kv, backend) = start_mock().await;
    let state = PopupState {
        show: true,
        content: "Hello".to_string(),
    };

    backend.save(&state).await.expect("save");

    let auth = kv.last_auth.lock().unwrap().clone().expect("auth header");
    assert_eq!(auth, "Bearer test-token");

    let body = kv.last_set_body.lock().unwrap().clone().expect("set body");
    let record: Value = serde_json::from_str(&body).expect("record is JSON");
    assert_eq!(record["show"], true);
    assert_eq!(record["content"], "Hello");
    assert!(
        record["updatedAt"].is_string(),
        "the whole composite record is written, stamp included"
    );
}

/// What `save` stores, `load` reads back: the record travels as a JSON
/// string inside the `result` envelope.
#[tokio::test]
async fn stored_record_string_round_trips() {
    let (_kv, backend) = start_mock().await;
    let state = PopupState {
        show: true,
        content: "Hi".to_string(),
    };

    backend.save(&state).await.expect("save");
    assert_eq!(backend.load().await, Some(state));
}

/// A one-field mutation through the store still writes both fields, so
/// the sibling field cannot be lost on the remote record.
#[tokio::test]
async fn one_field_update_writes_both_fields() {
    let (kv, backend) = start_mock().await;
    *kv.stored.lock().unwrap() = Some(Value::String(
        r#"{"show": false, "content": "Keep"}"#.to_string(),
    ));

    let store = PopupStore::new(Arc::new(backend));
    store.set_show(true).await;
    store.flush().await.expect("flush");

    let body = kv.last_set_body.lock().unwrap().clone().expect("set body");
    let record: Value = serde_json::from_str(&body).expect("record is JSON");
    assert_eq!(record["show"], true);
    assert_eq!(record["content"], "Keep", "sibling field must survive");
}
