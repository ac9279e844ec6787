use std::fmt::{self, Display};

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// Header multimap: repeated names keep every value, in arrival order, and
/// values that are not valid UTF-8 are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardServiceHeaders(HeaderMap);

impl ForwardServiceHeaders {
    /// First value of `name`, when it is valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Replaces every value of `name`. Invalid names or values are ignored.
    pub fn set(&mut self, name: &str, value: impl AsRef<str>) {
        if let Some((name, value)) = parse(name, value.as_ref()) {
            self.0.insert(name, value);
        }
    }

    pub fn append(&mut self, name: &str, value: impl AsRef<str>) {
        if let Some((name, value)) = parse(name, value.as_ref()) {
            self.0.append(name, value);
        }
    }

    pub fn strip(&mut self, names: &[&str]) {
        for name in names {
            self.0.remove(*name);
        }
    }

    pub fn content_type(&self) -> &str {
        self.get("content-type").unwrap_or_default()
    }

    pub fn has_json_content_type(&self) -> bool {
        self.content_type()
            .to_ascii_lowercase()
            .contains("application/json")
    }

    /// Number of values, counting every repetition.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes()).ok()?;
    let value = HeaderValue::from_str(value).ok()?;
    Some((name, value))
}

impl<const N: usize> From<[(String, String); N]> for ForwardServiceHeaders {
    fn from(arr: [(String, String); N]) -> Self {
        let mut headers = ForwardServiceHeaders::default();
        for (name, value) in arr {
            headers.append(&name, value);
        }
        headers
    }
}

impl From<&HeaderMap> for ForwardServiceHeaders {
    fn from(headers: &HeaderMap) -> Self {
        ForwardServiceHeaders(headers.clone())
    }
}

impl From<ForwardServiceHeaders> for HeaderMap {
    fn from(headers: ForwardServiceHeaders) -> Self {
        headers.0
    }
}

#[derive(Debug, Clone)]
pub struct ForwardServiceRequest {
    pub method: ForwardServiceRequestHttpMethod,
    pub url: Url,
    pub headers: ForwardServiceHeaders,
    pub body: Option<Bytes>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForwardServiceRequestHttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl ForwardServiceRequestHttpMethod {
    pub fn carries_body(&self) -> bool {
        !matches!(
            self,
            ForwardServiceRequestHttpMethod::Get | ForwardServiceRequestHttpMethod::Head
        )
    }
}

impl Display for ForwardServiceRequestHttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ForwardServiceRequestHttpMethod::Get => "GET",
            ForwardServiceRequestHttpMethod::Head => "HEAD",
            ForwardServiceRequestHttpMethod::Post => "POST",
            ForwardServiceRequestHttpMethod::Put => "PUT",
            ForwardServiceRequestHttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ForwardServiceRequestError {
    #[error("HTTP method {0} is not supported")]
    UnsupportedMethod(String),
}
