use std::fmt;

use url::Url;

use crate::proxy_service::proxy_service_error::ProxyServiceError;

pub const DEFAULT_UPSTREAM_PATH: &str = "/clima";

/// Controls the `url=` addressing mode, which lets callers point the proxy at
/// an arbitrary absolute URL instead of the configured base.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UrlOverridePolicy {
    #[default]
    Disabled,
    AnyHost,
    AllowList(Vec<String>),
}

impl UrlOverridePolicy {
    pub fn new(enabled: bool, allowed_hosts: Vec<String>) -> Self {
        match (enabled, allowed_hosts.is_empty()) {
            (false, _) => UrlOverridePolicy::Disabled,
            (true, true) => UrlOverridePolicy::AnyHost,
            (true, false) => UrlOverridePolicy::AllowList(allowed_hosts),
        }
    }

    pub fn permits(&self, url: &Url) -> bool {
        match self {
            UrlOverridePolicy::Disabled => false,
            UrlOverridePolicy::AnyHost => true,
            UrlOverridePolicy::AllowList(hosts) => url
                .host_str()
                .is_some_and(|host| hosts.iter().any(|h| h.eq_ignore_ascii_case(host))),
        }
    }
}

/// Process-wide, read-only proxy settings.
#[derive(Clone)]
pub struct ProxyConfig {
    pub base_url: Option<Url>,
    pub default_path: String,
    pub api_key: Option<String>,
    pub url_override: UrlOverridePolicy,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            default_path: DEFAULT_UPSTREAM_PATH.to_string(),
            api_key: None,
            url_override: UrlOverridePolicy::default(),
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("default_path", &self.default_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("url_override", &self.url_override)
            .finish()
    }
}

impl ProxyConfig {
    /// Resolves the outbound target. The base URL is checked first so a missing
    /// base always fails the same way, whichever addressing mode is requested.
    pub fn resolve_target(
        &self,
        path: Option<&str>,
        url: Option<&str>,
    ) -> Result<Url, ProxyServiceError> {
        let base_url = self
            .base_url
            .as_ref()
            .ok_or(ProxyServiceError::MissingBaseUrl)?;

        if let Some(url) = url {
            return self.resolve_override(url);
        }

        let path = path.unwrap_or(self.default_path.as_str());
        base_url
            .join(path)
            .map_err(|e| ProxyServiceError::InvalidTarget(format!("{path}: {e}")))
    }

    fn resolve_override(&self, raw: &str) -> Result<Url, ProxyServiceError> {
        if self.url_override == UrlOverridePolicy::Disabled {
            return Err(ProxyServiceError::TargetNotAllowed(
                "the url parameter is disabled".to_string(),
            ));
        }

        let url =
            Url::parse(raw).map_err(|e| ProxyServiceError::InvalidTarget(format!("{raw}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProxyServiceError::InvalidTarget(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }

        if !self.url_override.permits(&url) {
            return Err(ProxyServiceError::TargetNotAllowed(
                url.host_str().unwrap_or_default().to_string(),
            ));
        }

        Ok(url)
    }
}
