use bytes::Bytes;
use serde_json::Value;

/// The outbound body, decoded according to the inbound `content-type`.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundBody {
    Json(Value),
    Form(Vec<(String, String)>),
    /// Forwarded as received; the boundary stays in the copied `content-type`.
    Multipart(Bytes),
    Opaque(Bytes),
}

impl OutboundBody {
    /// Returns `None` when a declared JSON body does not parse (or is `null`):
    /// the request is then forwarded without a body.
    pub fn decode(content_type: &str, raw: Bytes) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();

        if content_type.contains("application/json") {
            match serde_json::from_slice(&raw) {
                Ok(Value::Null) | Err(_) => None,
                Ok(value) => Some(OutboundBody::Json(value)),
            }
        } else if content_type.contains("application/x-www-form-urlencoded") {
            let fields = url::form_urlencoded::parse(&raw).into_owned().collect();
            Some(OutboundBody::Form(fields))
        } else if content_type.contains("multipart/form-data") {
            Some(OutboundBody::Multipart(raw))
        } else {
            Some(OutboundBody::Opaque(raw))
        }
    }

    pub fn encode(self) -> Bytes {
        match self {
            OutboundBody::Json(value) => Bytes::from(value.to_string()),
            OutboundBody::Form(fields) => Bytes::from(
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish(),
            ),
            OutboundBody::Multipart(raw) | OutboundBody::Opaque(raw) => raw,
        }
    }
}
