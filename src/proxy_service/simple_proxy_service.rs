use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    forward_service::{
        forward_service::ForwardService,
        forward_service_request::{ForwardServiceHeaders, ForwardServiceRequest},
        forward_service_response::ForwardServiceResponse,
    },
    proxy_service::{
        outbound_body::OutboundBody, proxy_config::ProxyConfig, proxy_service::ProxyService,
        proxy_service_error::ProxyServiceError, proxy_service_request::ProxyServiceRequest,
        proxy_service_response::ProxyServiceResponse,
    },
};

/// Connection-specific, or invalidated once the body is re-encoded.
const STRIPPED_REQUEST_HEADERS: [&str; 5] = [
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "accept-encoding",
];

/// Transport framing that no longer matches once the body has been decoded.
const STRIPPED_RESPONSE_HEADERS: [&str; 3] =
    ["content-encoding", "transfer-encoding", "connection"];

const MAX_ERROR_PAYLOAD_BYTES: usize = 1024 * 1024;

pub struct SimpleProxyService {
    forward_service: Arc<dyn ForwardService>,
    config: ProxyConfig,
}

impl SimpleProxyService {
    pub fn new(forward_service: Arc<dyn ForwardService>, config: ProxyConfig) -> Self {
        Self {
            forward_service,
            config,
        }
    }

    fn outbound_headers(&self, inbound: ForwardServiceHeaders) -> ForwardServiceHeaders {
        let mut headers = inbound;
        headers.strip(&STRIPPED_REQUEST_HEADERS);

        if headers.get("accept").is_none() {
            headers.set("accept", "application/json");
        }

        if let Some(api_key) = &self.config.api_key {
            headers.set("authorization", format!("Bearer {api_key}"));
        }

        headers
    }
}

#[async_trait]
impl ProxyService for SimpleProxyService {
    async fn forward(
        &self,
        request: ProxyServiceRequest,
    ) -> Result<ProxyServiceResponse, ProxyServiceError> {
        let target_url = self
            .config
            .resolve_target(request.path.as_deref(), request.url.as_deref())?;

        let method = request.method;
        let headers = self.outbound_headers(request.headers);

        let body = if method.carries_body() {
            OutboundBody::decode(headers.content_type(), request.body).map(OutboundBody::encode)
        } else {
            None
        };

        let forward_request = ForwardServiceRequest {
            method,
            url: target_url.clone(),
            headers,
            body,
        };

        match self.forward_service.execute(forward_request).await {
            Ok(response) if (200..400).contains(&response.status) => {
                info!("Relaying {} from {} {}", response.status, method, target_url);

                let mut headers = response.headers;
                headers.strip(&STRIPPED_RESPONSE_HEADERS);

                Ok(ProxyServiceResponse {
                    status: response.status,
                    headers,
                    body: response.body,
                })
            }
            Ok(response) => {
                warn!(
                    "Upstream {} {} answered {}",
                    method, target_url, response.status
                );

                let upstream_status = response.status;
                let payload = read_error_payload(response).await;

                Err(ProxyServiceError::Upstream {
                    upstream_status,
                    upstream_url: target_url.to_string(),
                    method,
                    payload,
                })
            }
            Err(err) => {
                error!("Forwarding {} {} failed: {}", method, target_url, err);

                Err(ProxyServiceError::Transport {
                    detail: err.to_string(),
                    target_url: target_url.to_string(),
                    method,
                })
            }
        }
    }
}

/// Best effort: parsed JSON when the upstream declared it, text otherwise,
/// and an empty string when neither can be obtained.
async fn read_error_payload(response: ForwardServiceResponse) -> Value {
    let is_json = response.headers.has_json_content_type();

    let Ok(raw) = axum::body::to_bytes(response.body, MAX_ERROR_PAYLOAD_BYTES).await else {
        return Value::String(String::new());
    };

    if is_json {
        serde_json::from_slice(&raw).unwrap_or_else(|_| Value::String(String::new()))
    } else {
        Value::String(String::from_utf8_lossy(&raw).into_owned())
    }
}
