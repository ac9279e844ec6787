pub mod outbound_body;
pub mod proxy_config;
pub mod proxy_service;
pub mod proxy_service_error;
pub mod proxy_service_request;
pub mod proxy_service_response;
pub mod simple_proxy_service;
