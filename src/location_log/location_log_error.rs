use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LocationLogError {
    #[error("Invalid or missing coordinates")]
    InvalidCoordinates,
    #[error("Poisoned read")]
    PoisonedRead,
    #[error("Poisoned write")]
    PoisonedWrite,
}

impl IntoResponse for LocationLogError {
    fn into_response(self) -> Response {
        let status = match self {
            LocationLogError::InvalidCoordinates => StatusCode::BAD_REQUEST,
            LocationLogError::PoisonedRead | LocationLogError::PoisonedWrite => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
