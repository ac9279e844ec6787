use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::ServerState;

pub(crate) async fn read_last(State(state): State<ServerState>) -> Response {
    match state.weather_store.read_last().await {
        Ok(document) => Json(document).into_response(),
        Err(err) => {
            debug!("No last weather to serve: {}", err);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "No data", "detail": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Parses the body as JSON and stores it as the last weather.
pub(crate) async fn persist(state: &ServerState, body: &[u8]) -> Result<(), String> {
    let document = serde_json::from_slice::<Value>(body).map_err(|e| e.to_string())?;

    state
        .weather_store
        .write_last(document)
        .await
        .map_err(|e| e.to_string())
}

pub(crate) async fn write_last(State(state): State<ServerState>, body: Bytes) -> Response {
    match persist(&state, &body).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(detail) => {
            error!("Failed to save last weather: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to save", "detail": detail })),
            )
                .into_response()
        }
    }
}
