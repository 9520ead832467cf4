//! Prometheus exporter for Hetzner server-market prices.
//!
//! Polls the Robot webservice on a fixed interval, tracks which offers
//! appear and disappear, and serves their monthly prices as
//! `hetzner_server_market_price` gauges on `/metrics`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use market_observe::{LogFormat, LogOptions, init_logging};
use market_prometheus::{Encoder, PriceCollector, Registry, TextEncoder};
use market_refresh::RefreshConfig;
use market_registry::OfferRegistry;
use market_robot::{Credentials, RobotClient};

#[derive(Parser, Debug)]
#[command(name = "market-exporter", version, about, long_about = None)]
struct Args {
    /// The address to listen on for HTTP scrape requests.
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen_address: SocketAddr,

    /// The path to the Robot API credentials (JSON with username/password).
    #[arg(long, default_value = "hetzner-robot-creds.json")]
    robot_api_credentials: PathBuf,

    /// Fetch the server market every [interval] seconds.
    #[arg(long, default_value_t = 600)]
    refresh_interval: u64,

    /// Log output format (text|json).
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Log level filter (env-filter syntax).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&LogOptions {
        format: args.log_format,
        filter: args.log_level.clone(),
        ..Default::default()
    })?;

    let credentials = Credentials::from_file(&args.robot_api_credentials)
        .context("could not load Robot API credentials")?;
    let client = RobotClient::new(credentials);

    let offers = OfferRegistry::new();
    let collector = PriceCollector::new(offers.clone())?;
    let registry = Registry::new();
    registry.register(Box::new(collector))?;

    let cancel = CancellationToken::new();
    let refresh_config = RefreshConfig {
        interval: Duration::from_secs(args.refresh_interval),
        ..Default::default()
    };
    let refresher = tokio::spawn(market_refresh::run(
        client,
        offers,
        refresh_config,
        cancel.clone(),
    ));

    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(registry);
    let listener = tokio::net::TcpListener::bind(args.listen_address)
        .await
        .with_context(|| format!("could not bind {}", args.listen_address))?;
    info!("listening on {}", args.listen_address);
    info!("metrics available under /metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    cancel.cancel();
    refresher.await?;
    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("could not listen for shutdown signal: {}", e);
    } else {
        info!("shutdown signal received");
    }
    cancel.cancel();
}

/// GET /metrics
async fn metrics_handler(State(registry): State<Registry>) -> Response {
    let families = registry.gather();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&families, &mut buffer) {
        error!("could not encode metrics: {}", e);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    ([(header::CONTENT_TYPE, encoder.format_type())], buffer).into_response()
}
