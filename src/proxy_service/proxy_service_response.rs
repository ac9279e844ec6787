use std::fmt;

use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, StatusCode};

use crate::forward_service::forward_service_request::ForwardServiceHeaders;

/// A successful upstream answer, already stripped of transport framing
/// headers, whose body is still streaming.
pub struct ProxyServiceResponse {
    pub status: u16,
    pub headers: ForwardServiceHeaders,
    pub body: Body,
}

impl ProxyServiceResponse {
    pub fn is_json(&self) -> bool {
        self.headers.has_json_content_type()
    }
}

impl fmt::Debug for ProxyServiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyServiceResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl IntoResponse for ProxyServiceResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let headers: HeaderMap = self.headers.into();

        (status, headers, self.body).into_response()
    }
}
