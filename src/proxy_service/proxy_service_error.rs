use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::{Value, json};

use crate::forward_service::forward_service_request::ForwardServiceRequestHttpMethod;

#[derive(Debug, thiserror::Error)]
pub enum ProxyServiceError {
    #[error("UPSTREAM_BASE_URL is not set")]
    MissingBaseUrl,

    #[error("Invalid upstream target: {0}")]
    InvalidTarget(String),

    #[error("Upstream target not allowed: {0}")]
    TargetNotAllowed(String),

    #[error("Unreadable request body: {0}")]
    UnreadableBody(String),

    #[error("Upstream error")]
    Upstream {
        upstream_status: u16,
        upstream_url: String,
        method: ForwardServiceRequestHttpMethod,
        payload: Value,
    },

    #[error("Proxy error")]
    Transport {
        detail: String,
        target_url: String,
        method: ForwardServiceRequestHttpMethod,
    },
}

impl IntoResponse for ProxyServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyServiceError::MissingBaseUrl => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
            ProxyServiceError::InvalidTarget(detail) | ProxyServiceError::UnreadableBody(detail) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "detail": detail }),
            ),
            ProxyServiceError::TargetNotAllowed(detail) => (
                StatusCode::FORBIDDEN,
                json!({ "error": self.to_string(), "detail": detail }),
            ),
            // 502 regardless of the upstream status; callers read upstreamStatus.
            ProxyServiceError::Upstream {
                upstream_status,
                upstream_url,
                method,
                payload,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": self.to_string(),
                    "upstreamStatus": upstream_status,
                    "upstreamUrl": upstream_url,
                    "method": method.to_string(),
                    "payload": payload,
                }),
            ),
            ProxyServiceError::Transport {
                detail,
                target_url,
                method,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": self.to_string(),
                    "detail": detail,
                    "targetUrl": target_url,
                    "method": method.to_string(),
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
