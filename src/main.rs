use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use weather_gateway::cli_arguments::CliArguments;
use weather_gateway::forward_service::reqwest_forward_service::ReqwestForwardService;
use weather_gateway::location_log::location_log::LocationLog;
use weather_gateway::prediction_service::gateway_prediction_service::GatewayPredictionService;
use weather_gateway::proxy_service::proxy_config::UrlOverridePolicy;
use weather_gateway::proxy_service::simple_proxy_service::SimpleProxyService;
use weather_gateway::weather_store::file_weather_store::FileWeatherStore;
use weather_gateway::{ServerState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: CliArguments = CliArguments::parse();
    let proxy_config = args.proxy_config();

    match &proxy_config.base_url {
        Some(base_url) => info!("Proxying to {}", base_url),
        None => warn!("UPSTREAM_BASE_URL is not set, every proxied call will fail"),
    }
    if proxy_config.url_override == UrlOverridePolicy::AnyHost {
        warn!("The url parameter may target any host");
    }

    let forward_service =
        ReqwestForwardService::with_timeout(Duration::from_secs(args.upstream_timeout_secs))?;
    let proxy_service = Arc::new(SimpleProxyService::new(
        Arc::new(forward_service),
        proxy_config,
    ));
    let prediction_service = Arc::new(GatewayPredictionService::new(
        proxy_service.clone(),
        args.prediction_path.clone(),
    ));
    let weather_store = Arc::new(FileWeatherStore::new(&args.data_dir));
    info!("Last weather is kept in {}", weather_store.path().display());

    let state = ServerState {
        proxy_service,
        prediction_service,
        weather_store,
        location_log: Arc::new(LocationLog::new(args.location_log_capacity)),
        max_body_bytes: args.max_body_bytes,
    };

    let tcp_listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

    info!("Server started on port {}", args.port);

    axum::serve(tcp_listener, router(state)).await?;

    Ok(())
}
