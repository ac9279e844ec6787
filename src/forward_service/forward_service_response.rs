use std::fmt;

use axum::body::Body;

use crate::forward_service::forward_service_request::ForwardServiceHeaders;

/// Upstream answer. The body is a stream and is only pulled when relayed.
pub struct ForwardServiceResponse {
    pub status: u16,
    pub headers: ForwardServiceHeaders,
    pub body: Body,
}

impl ForwardServiceResponse {
    pub fn content_type(&self) -> &str {
        self.headers.content_type()
    }
}

impl fmt::Debug for ForwardServiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardServiceResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Upstream request timed out")]
    Timeout,
}
