use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, response::IntoResponse};
use http::{Method, StatusCode};
use tracing::{debug, info};

use crate::forward_service::{
    forward_service::ForwardService,
    forward_service_error::{ForwardFailure, ForwardFailureKind},
    forward_service_request::{
        ForwardServiceHeaders, ForwardServiceRequest, ForwardServiceRequestError,
        ForwardServiceRequestHttpMethod,
    },
    forward_service_response::{ForwardServiceError, ForwardServiceResponse},
};

#[derive(Clone)]
pub struct ReqwestForwardService {
    client: reqwest::Client,
}

impl ReqwestForwardService {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ForwardServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForwardServiceError::InvalidRequest(e.to_string()))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl ForwardService for ReqwestForwardService {
    async fn execute(
        &self,
        request: ForwardServiceRequest,
    ) -> Result<ForwardServiceResponse, ForwardServiceError> {
        info!("Forwarding {} {}", request.method, request.url);

        let mut request_builder = self
            .client
            .request(request.method.into(), request.url)
            .headers(request.headers.into());

        if let Some(body) = request.body {
            request_builder = request_builder.body(body);
        }

        let reqwest_response = request_builder
            .send()
            .await
            .map_err(ForwardServiceError::from)?;

        let status = reqwest_response.status().as_u16();
        debug!("Upstream answered with {}", status);

        let headers: ForwardServiceHeaders = reqwest_response.headers().into();

        Ok(ForwardServiceResponse {
            status,
            headers,
            body: Body::from_stream(reqwest_response.bytes_stream()),
        })
    }
}

impl ForwardFailure for reqwest::Error {
    fn kind(&self) -> ForwardFailureKind {
        if self.is_timeout() {
            ForwardFailureKind::Timeout
        } else if self.is_connect() || self.is_request() || self.is_body() {
            ForwardFailureKind::Unreachable
        } else {
            ForwardFailureKind::Malformed
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ForwardServiceRequestError {
    fn into_response(self) -> axum::response::Response {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

impl TryFrom<&Method> for ForwardServiceRequestHttpMethod {
    type Error = ForwardServiceRequestError;

    fn try_from(value: &Method) -> Result<Self, Self::Error> {
        match *value {
            Method::GET => Ok(ForwardServiceRequestHttpMethod::Get),
            Method::HEAD => Ok(ForwardServiceRequestHttpMethod::Head),
            Method::POST => Ok(ForwardServiceRequestHttpMethod::Post),
            Method::PUT => Ok(ForwardServiceRequestHttpMethod::Put),
            Method::DELETE => Ok(ForwardServiceRequestHttpMethod::Delete),
            _ => Err(ForwardServiceRequestError::UnsupportedMethod(
                value.to_string(),
            )),
        }
    }
}

impl From<ForwardServiceRequestHttpMethod> for reqwest::Method {
    fn from(value: ForwardServiceRequestHttpMethod) -> Self {
        match value {
            ForwardServiceRequestHttpMethod::Get => reqwest::Method::GET,
            ForwardServiceRequestHttpMethod::Head => reqwest::Method::HEAD,
            ForwardServiceRequestHttpMethod::Post => reqwest::Method::POST,
            ForwardServiceRequestHttpMethod::Put => reqwest::Method::PUT,
            ForwardServiceRequestHttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}
