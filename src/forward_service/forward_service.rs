use async_trait::async_trait;

use crate::forward_service::forward_service_request::ForwardServiceRequest;
use crate::forward_service::forward_service_response::{
    ForwardServiceError, ForwardServiceResponse,
};

/// Issues a single outbound HTTP call. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForwardService: Send + Sync {
    async fn execute(
        &self,
        request: ForwardServiceRequest,
    ) -> Result<ForwardServiceResponse, ForwardServiceError>;
}
