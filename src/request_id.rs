use http::{HeaderName, HeaderValue, Request};
use uuid::Uuid;

use tower_http::request_id::{MakeRequestId, RequestId};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Tags every inbound request with a v4 uuid. The header is forwarded upstream
/// with the other inbound headers, so both sides log the same id.
#[derive(Clone, Default)]
pub struct GatewayRequestId {}

impl MakeRequestId for GatewayRequestId {
    fn make_request_id<B>(&mut self, _: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
