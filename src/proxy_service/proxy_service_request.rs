use bytes::Bytes;

use crate::forward_service::forward_service_request::{
    ForwardServiceHeaders, ForwardServiceRequestHttpMethod,
};

/// An inbound request as seen by the proxy: the addressing parameters taken
/// from the query string, the raw headers and the raw body.
#[derive(Debug, Clone)]
pub struct ProxyServiceRequest {
    pub method: ForwardServiceRequestHttpMethod,
    pub path: Option<String>,
    pub url: Option<String>,
    pub headers: ForwardServiceHeaders,
    pub body: Bytes,
}

impl ProxyServiceRequest {
    pub fn new(
        method: ForwardServiceRequestHttpMethod,
        headers: ForwardServiceHeaders,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            path: None,
            url: None,
            headers,
            body,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Reads `path` and `url` from a raw query string. Empty values count as absent.
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        let Some(query) = query else {
            return self;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "path" if self.path.is_none() => self.path = Some(value.into_owned()),
                "url" if self.url.is_none() => self.url = Some(value.into_owned()),
                _ => {}
            }
        }
        self
    }
}
