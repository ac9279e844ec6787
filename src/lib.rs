pub mod cli_arguments;
pub mod forward_service;
pub mod location_log;
pub mod prediction_service;
pub mod proxy_service;
pub mod request_id;
mod route;
pub mod weather_store;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};

use crate::location_log::location_log::LocationLog;
use crate::prediction_service::prediction_service::PredictionService;
use crate::proxy_service::proxy_service::ProxyService;
use crate::request_id::{GatewayRequestId, UNKNOWN_REQUEST_ID, X_REQUEST_ID};
use crate::route::{health::health, last_weather, locations, proxy::proxy, weather};
use crate::weather_store::weather_store::WeatherStore;

pub const PROXY_ROUTE: &str = "/api/hf";
pub const WEATHER_ROUTE: &str = "/api/weather";
pub const LAST_WEATHER_ROUTE: &str = "/api/weather/last";
pub const LOCATIONS_ROUTE: &str = "/api/locations";

#[derive(Clone)]
pub struct ServerState {
    pub proxy_service: Arc<dyn ProxyService>,
    pub prediction_service: Arc<dyn PredictionService>,
    pub weather_store: Arc<dyn WeatherStore>,
    pub location_log: Arc<LocationLog>,
    pub max_body_bytes: usize,
}

pub fn router(server_state: ServerState) -> Router {
    let max_body_bytes = server_state.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route(
            PROXY_ROUTE,
            get(proxy).head(proxy).post(proxy).put(proxy).delete(proxy),
        )
        .route(
            WEATHER_ROUTE,
            post(weather::predict)
                .get(weather::info)
                .put(weather::save_last)
                .head(weather::probe),
        )
        .route(
            LAST_WEATHER_ROUTE,
            get(last_weather::read_last).post(last_weather::write_last),
        )
        .route(LOCATIONS_ROUTE, post(locations::create).get(locations::list))
        .with_state(server_state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    X_REQUEST_ID.clone(),
                    GatewayRequestId::default(),
                ))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<_>| {
                            let request_id = request
                                .headers()
                                .get(X_REQUEST_ID)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or(UNKNOWN_REQUEST_ID);

                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id,
                            )
                        })
                        .on_response(DefaultOnResponse::new().include_headers(true)),
                ),
        )
}
