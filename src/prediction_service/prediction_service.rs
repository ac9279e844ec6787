use async_trait::async_trait;

use crate::prediction_service::{
    prediction_service_request::PredictionServiceRequest,
    prediction_service_response::PredictionServiceResponse,
};

/// Produces a prediction for a location and date. Never fails: upstream
/// problems are absorbed by the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, request: PredictionServiceRequest) -> PredictionServiceResponse;
}
