use axum::{Json, response::IntoResponse};
use serde_json::json;
use tracing::debug;

pub(crate) async fn health() -> impl IntoResponse {
    debug!("Health check executed");
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
