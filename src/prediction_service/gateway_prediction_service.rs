use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    forward_service::forward_service_request::{
        ForwardServiceHeaders, ForwardServiceRequestHttpMethod,
    },
    prediction_service::{
        fallback_simulation::simulate, prediction_service::PredictionService,
        prediction_service_error::PredictionServiceError,
        prediction_service_request::PredictionServiceRequest,
        prediction_service_response::PredictionServiceResponse,
    },
    proxy_service::{proxy_service::ProxyService, proxy_service_request::ProxyServiceRequest},
};

pub const DEFAULT_PREDICTION_PATH: &str = "/clima";

const MAX_PREDICTION_BYTES: usize = 1024 * 1024;

/// Asks the upstream model once through the proxy and falls back to the
/// local simulation on any failure.
pub struct GatewayPredictionService {
    proxy_service: Arc<dyn ProxyService>,
    prediction_path: String,
}

impl GatewayPredictionService {
    pub fn new(proxy_service: Arc<dyn ProxyService>, prediction_path: String) -> Self {
        Self {
            proxy_service,
            prediction_path,
        }
    }

    async fn query_upstream(
        &self,
        request: &PredictionServiceRequest,
    ) -> Result<Value, PredictionServiceError> {
        let body = serde_json::to_vec(request)?;
        let headers = ForwardServiceHeaders::from([(
            "content-type".to_string(),
            "application/json".to_string(),
        )]);

        let proxy_request = ProxyServiceRequest::new(
            ForwardServiceRequestHttpMethod::Post,
            headers,
            Bytes::from(body),
        )
        .with_path(self.prediction_path.as_str());

        let response = self.proxy_service.forward(proxy_request).await?;

        if !response.is_json() {
            return Err(PredictionServiceError::NotJson {
                status: response.status,
                content_type: response.headers.content_type().to_string(),
            });
        }

        let raw = axum::body::to_bytes(response.body, MAX_PREDICTION_BYTES)
            .await
            .map_err(|e| PredictionServiceError::UnreadableBody(e.to_string()))?;

        Ok(serde_json::from_slice(&raw)?)
    }
}

fn fallback(request: &PredictionServiceRequest) -> PredictionServiceResponse {
    let mut rng = rand::rng();
    PredictionServiceResponse::Fallback(simulate(request, &mut rng, Utc::now()))
}

#[async_trait]
impl PredictionService for GatewayPredictionService {
    async fn predict(&self, request: PredictionServiceRequest) -> PredictionServiceResponse {
        info!("Prediction requested for {:?}", request);

        match self.query_upstream(&request).await {
            Ok(prediction) => {
                info!("Upstream prediction received");
                PredictionServiceResponse::Upstream(prediction)
            }
            Err(err) => {
                warn!("Upstream prediction unavailable, simulating locally: {}", err);
                fallback(&request)
            }
        }
    }
}
