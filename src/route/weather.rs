use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use tracing::error;

use crate::{
    ServerState, prediction_service::prediction_service_request::PredictionServiceRequest,
    route::last_weather::persist,
};

pub(crate) async fn predict(State(state): State<ServerState>, body: Bytes) -> Response {
    let request: PredictionServiceRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            error!("Rejecting prediction request: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "detail": err.to_string() })),
            )
                .into_response();
        }
    };

    Json(state.prediction_service.predict(request).await).into_response()
}

pub(crate) async fn info() -> impl IntoResponse {
    Json(json!({
        "message": "Weather Prediction API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "working",
    }))
}

pub(crate) async fn save_last(State(state): State<ServerState>, body: Bytes) -> Response {
    match persist(&state, &body).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(detail) => {
            error!("Failed to save last weather: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to save last weather", "detail": detail })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn probe() -> StatusCode {
    StatusCode::OK
}
