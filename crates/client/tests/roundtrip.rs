//! Round-trip tests against a real in-process API server.

use std::sync::Arc;

use popsync_api::state::AppState;
use popsync_client::ApiClient;
use popsync_core::{PopupStore, StateUpdate};

/// Spawn the API over an in-memory store on an ephemeral port and return a
/// client bound to it.
async fn start_server() -> ApiClient {
    let store = Arc::new(PopupStore::in_memory());
    let app = popsync_api::app(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    ApiClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn fresh_server_returns_defaults() {
    let client = start_server().await;

    let state = client.fetch_state().await.expect("fetch");
    assert!(!state.show);
    assert_eq!(state.content, "");
}

#[tokio::test]
async fn writes_round_trip_through_the_server() {
    let client = start_server().await;

    let after = client.save_content("Hello").await.expect("save content");
    assert_eq!(after.content, "Hello");
    assert!(!after.show, "content save must not flip the toggle");

    let after = client.set_show(true).await.expect("set show");
    assert!(after.show);
    assert_eq!(after.content, "Hello", "toggle must not clobber content");

    let state = client.fetch_state().await.expect("fetch");
    assert!(state.show);
    assert_eq!(state.content, "Hello");
}

#[tokio::test]
async fn combined_update_applies_both_fields() {
    let client = start_server().await;

    let update = StateUpdate {
        show: Some(true),
        content: Some("Welcome".to_string()),
    };
    let after = client.send(&update).await.expect("send");
    assert!(after.show);
    assert_eq!(after.content, "Welcome");
}

#[tokio::test]
async fn unreachable_server_fails_closed() {
    // Nothing listens on port 1.
    let client = ApiClient::new("http://127.0.0.1:1");

    assert!(client.fetch_state().await.is_err());

    let state = client.fetch_state_or_hidden().await;
    assert!(!state.show, "fetch failures must hide the popup");
    assert_eq!(state.content, "");
}
