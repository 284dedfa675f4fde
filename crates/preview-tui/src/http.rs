use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use preview_proto::client::MetadataSource;
use preview_proto::controller::FetchController;
use preview_proto::protocol::PreviewState;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

struct HttpState<S> {
    controller: Arc<FetchController<S>>,
}

// derive(Clone) would demand `S: Clone`.
impl<S> Clone for HttpState<S> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

#[derive(Deserialize)]
struct TargetRequest {
    address: String,
}

pub fn router<S: MetadataSource>(controller: Arc<FetchController<S>>) -> Router {
    Router::new()
        .route("/api/preview", get(get_preview::<S>))
        .route("/api/target", post(set_target::<S>))
        .layer(CorsLayer::permissive())
        .with_state(HttpState { controller })
}

pub fn start_server<S: MetadataSource>(
    bind_address: String,
    port: u16,
    controller: Arc<FetchController<S>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(controller);

        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind HTTP server to {}: {}", addr, e);
                return;
            }
        };

        info!("HTTP API server listening on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    })
}

async fn get_preview<S: MetadataSource>(State(state): State<HttpState<S>>) -> Json<PreviewState> {
    Json(state.controller.snapshot().await)
}

async fn set_target<S: MetadataSource>(
    State(state): State<HttpState<S>>,
    Json(req): Json<TargetRequest>,
) -> StatusCode {
    info!("HTTP API: target {}", req.address);
    match state.controller.set_target_address(req.address).await {
        Some(_) => StatusCode::ACCEPTED,
        None => StatusCode::OK,
    }
}
