//! In-process HTTP fixtures for async tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral localhost port, returning its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Endpoint answering 503 for the first `failures` hits, then `body`
///
/// Returns the base URL and the shared hit counter.
pub async fn spawn_flaky(failures: usize, body: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/",
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    (StatusCode::SERVICE_UNAVAILABLE, "waking up").into_response()
                } else {
                    Json(body).into_response()
                }
            }
        }),
    );
    (spawn_server(router).await, hits)
}

/// Endpoint that always answers 200 with a non-JSON body
pub async fn spawn_plain_text() -> String {
    let router = Router::new().route("/", get(|| async { "definitely not json" }));
    spawn_server(router).await
}

/// A localhost URL nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Failure count for an endpoint that never recovers
pub const ALWAYS_FAILING: usize = usize::MAX;
