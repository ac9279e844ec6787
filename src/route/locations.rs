use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::{ServerState, location_log::location_record::LocationInput};

pub(crate) async fn create(State(state): State<ServerState>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to read location: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error", "details": err.to_string() })),
            )
                .into_response();
        }
    };

    let appended = LocationInput::try_from(&value).and_then(|input| state.location_log.append(input));

    match appended {
        Ok((location, total)) => {
            info!("Location {} logged ({} held)", location.id, total);
            Json(json!({
                "success": true,
                "message": "Location saved",
                "location": location,
                "totalLocations": total,
            }))
            .into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list(State(state): State<ServerState>) -> Response {
    match state.location_log.list() {
        Ok(locations) => {
            debug!("Serving {} locations", locations.len());
            Json(locations).into_response()
        }
        Err(err) => err.into_response(),
    }
}
