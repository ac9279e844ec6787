use crate::proxy_service::proxy_service_error::ProxyServiceError;

/// Reasons the upstream answer was discarded in favour of the simulation.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Proxy(#[from] ProxyServiceError),

    #[error("upstream answered {status} with content-type {content_type:?}")]
    NotJson { status: u16, content_type: String },

    #[error("upstream body could not be read: {0}")]
    UnreadableBody(String),

    #[error("upstream body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
