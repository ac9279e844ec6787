use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
};

use crate::{
    ServerState,
    forward_service::forward_service_request::ForwardServiceRequestHttpMethod,
    proxy_service::{
        proxy_service_error::ProxyServiceError, proxy_service_request::ProxyServiceRequest,
    },
};

/// Single entry point behind GET, HEAD, POST, PUT and DELETE on the proxy route.
pub(crate) async fn proxy(State(state): State<ServerState>, request: Request<Body>) -> Response {
    let method = match ForwardServiceRequestHttpMethod::try_from(request.method()) {
        Ok(method) => method,
        Err(err) => return err.into_response(),
    };

    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(body) => body,
        Err(err) => return ProxyServiceError::UnreadableBody(err.to_string()).into_response(),
    };

    let proxy_request = ProxyServiceRequest::new(method, (&parts.headers).into(), body)
        .with_query(parts.uri.query());

    match state.proxy_service.forward(proxy_request).await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}
