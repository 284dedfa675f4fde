//! HttpMetadataClient against a throw-away local metadata service.

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use preview_proto::client::{HttpMetadataClient, MetadataSource};
use preview_proto::config::{Sequencing, ServiceConfig};
use preview_proto::controller::FetchController;
use preview_proto::error::FetchError;
use preview_proto::protocol::{FetchOutcome, Status, NO_DESCRIPTION, NO_PREVIEW};
use preview_proto::theme::{ThemePolicy, INSTITUTIONAL_TOKEN};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const METADATA_PATH: &str = "/api/services/website/metadata";

/// Serve `router` on an ephemeral port and return the metadata base URL.
async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}{METADATA_PATH}")
}

fn client_for(base_url: String) -> HttpMetadataClient {
    HttpMetadataClient::new(&ServiceConfig {
        base_url,
        ..ServiceConfig::default()
    })
    .unwrap()
}

/// Echoes the decoded `q` parameter back as the page title.
async fn echo(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!({ "data": { "title": q } }))
}

#[tokio::test]
async fn sends_the_address_as_q() {
    let base = serve(Router::new().route(METADATA_PATH, get(echo))).await;
    let client = client_for(base);

    let address = "https://psu.edu/news?tab=all&page=2";
    let body = client.fetch(address).await.unwrap();
    assert_eq!(body["data"]["title"], address);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let router = Router::new().route(
        METADATA_PATH,
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let client = client_for(serve(router).await);

    let err = client.fetch("https://example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Status(s) if s == StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let router = Router::new().route(METADATA_PATH, get(|| async { "<html>not json</html>" }));
    let client = client_for(serve(router).await);

    let err = client.fetch("https://example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}{METADATA_PATH}"));
    let err = client.fetch("https://example.com").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn controller_over_http_end_to_end() {
    let router = Router::new().route(
        METADATA_PATH,
        get(|| async {
            Json(json!({ "data": { "title": "PSU News", "url": "https://psu.edu/news" } }))
        }),
    );
    let client = client_for(serve(router).await);
    let controller = FetchController::new(client, ThemePolicy::default(), Sequencing::LatestTrigger);

    controller
        .set_target_address("https://psu.edu/news")
        .await
        .unwrap()
        .await
        .unwrap();

    let state = controller.snapshot().await;
    assert_eq!(state.record.title, "PSU News");
    assert_eq!(state.record.description, NO_DESCRIPTION);
    assert_eq!(state.record.canonical_link, "https://psu.edu/news");
    assert_eq!(state.record.accent_color, INSTITUTIONAL_TOKEN);
    assert_eq!(state.status, Status::Idle);
}

#[tokio::test]
async fn controller_over_http_failure_degrades() {
    let router = Router::new().route(
        METADATA_PATH,
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = client_for(serve(router).await);
    let controller = FetchController::new(client, ThemePolicy::default(), Sequencing::LatestTrigger);

    controller
        .set_target_address("https://example.com/a")
        .await
        .unwrap()
        .await
        .unwrap();

    let state = controller.snapshot().await;
    assert_eq!(state.record.title, NO_PREVIEW);
    assert_eq!(state.record.canonical_link, "");
    assert_eq!(state.status, Status::Idle);
    assert!(state.last_error.unwrap().contains("500"));
}

#[tokio::test]
async fn controller_over_refused_connection_degrades() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}{METADATA_PATH}"));
    let controller = FetchController::new(client, ThemePolicy::default(), Sequencing::LatestTrigger);

    let outcome = controller
        .set_target_address("https://psu.edu/x")
        .await
        .unwrap()
        .await
        .unwrap();
    assert!(matches!(outcome, FetchOutcome::Failed { .. }));

    let state = controller.snapshot().await;
    assert_eq!(state.record.title, NO_PREVIEW);
    assert_eq!(state.record.description, "");
    assert_eq!(state.record.image, "");
    assert_eq!(state.record.canonical_link, "");
    assert_eq!(state.record.accent_color, INSTITUTIONAL_TOKEN);
    assert_eq!(state.status, Status::Idle);
    assert!(state
        .last_error
        .unwrap()
        .starts_with("metadata request failed"));
}
