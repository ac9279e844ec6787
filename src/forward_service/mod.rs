pub mod forward_service;
pub mod forward_service_error;
pub mod forward_service_request;
pub mod forward_service_response;
pub mod reqwest_forward_service;
