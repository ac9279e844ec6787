use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::{
    location_log::location_log::DEFAULT_LOCATION_LOG_CAPACITY,
    prediction_service::gateway_prediction_service::DEFAULT_PREDICTION_PATH,
    proxy_service::proxy_config::{DEFAULT_UPSTREAM_PATH, ProxyConfig, UrlOverridePolicy},
};

/// Every flag can also be given through the environment variable shown in `--help`.
#[derive(Parser, Clone)]
#[command(version, about, long_about = None)]
pub struct CliArguments {
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Upstream prediction service, e.g. https://my-space.hf.space
    #[arg(short, long, env = "UPSTREAM_BASE_URL")]
    pub upstream_base_url: Option<Url>,

    /// Relative path used when a proxied request has no `path` parameter
    #[arg(long, env = "UPSTREAM_DEFAULT_PATH", default_value = DEFAULT_UPSTREAM_PATH)]
    pub default_path: String,

    /// Upstream path the prediction endpoint posts to
    #[arg(long, env = "PREDICTION_PATH", default_value = DEFAULT_PREDICTION_PATH)]
    pub prediction_path: String,

    /// Sent upstream as a bearer token
    #[arg(long, env = "UPSTREAM_API_KEY", hide_env_values = true)]
    pub upstream_api_key: Option<String>,

    /// Accept the `url` parameter, which targets an absolute URL instead of the base
    #[arg(long, env = "ALLOW_URL_OVERRIDE")]
    pub allow_url_override: bool,

    /// Hosts the `url` parameter may target; empty means any host
    #[arg(
        long = "allowed-upstream-host",
        env = "ALLOWED_UPSTREAM_HOSTS",
        value_delimiter = ','
    )]
    pub allowed_upstream_hosts: Vec<String>,

    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_body_bytes: usize,

    /// Directory holding last_weather.json
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, env = "LOCATION_LOG_CAPACITY", default_value_t = DEFAULT_LOCATION_LOG_CAPACITY)]
    pub location_log_capacity: usize,
}

impl CliArguments {
    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig {
            base_url: self.upstream_base_url.clone(),
            default_path: self.default_path.clone(),
            api_key: self.upstream_api_key.clone(),
            url_override: UrlOverridePolicy::new(
                self.allow_url_override,
                self.allowed_upstream_hosts.clone(),
            ),
        }
    }
}
