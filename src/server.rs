//! HTTP front door: hands raw headers and body to the interaction endpoint.

use crate::interaction::{Headers, InteractionEndpoint};
use anyhow::Context as _;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use std::sync::Arc;
use tracing::info;

/// Routes accepting interaction requests
pub fn router(endpoint: Arc<InteractionEndpoint>) -> Router {
    Router::new()
        .route("/", post(handle_interaction))
        .route("/interactions", post(handle_interaction))
        .with_state(endpoint)
}

/// Bind `listen_addr` and serve interactions until the process exits
pub async fn serve(listen_addr: &str, endpoint: Arc<InteractionEndpoint>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Binding {listen_addr}"))?;

    info!(
        addr = %listener.local_addr().context("Reading bound address")?,
        "Listening for interactions"
    );

    axum::serve(listener, router(endpoint))
        .await
        .context("Serving interactions endpoint")
}

async fn handle_interaction(
    State(endpoint): State<Arc<InteractionEndpoint>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let response = endpoint.handle(&Headers::from(&headers), &body).await;
    let status = StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::OK);

    (status, Json(response))
}
