pub mod fallback_simulation;
pub mod gateway_prediction_service;
pub mod prediction_service;
pub mod prediction_service_error;
pub mod prediction_service_request;
pub mod prediction_service_response;
