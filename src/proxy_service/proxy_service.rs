use async_trait::async_trait;

use crate::proxy_service::{
    proxy_service_error::ProxyServiceError, proxy_service_request::ProxyServiceRequest,
    proxy_service_response::ProxyServiceResponse,
};

/// Forwards one inbound request to the configured upstream and relays the
/// answer. Every call is independent of every other call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProxyService: Send + Sync {
    async fn forward(
        &self,
        request: ProxyServiceRequest,
    ) -> Result<ProxyServiceResponse, ProxyServiceError>;
}
