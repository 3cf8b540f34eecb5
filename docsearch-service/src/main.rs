mod error;
mod metrics;
mod routes;
mod state;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use docsearch_core::Config;
use state::{AppState, SharedState};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsearch-service")]
#[command(about = "Documentation search and selection over HTTP", long_about = None)]
struct Args {
    /// TOML config file (built-in sources when omitted)
    #[arg(long, env = "DOCSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the configured port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env_overrides();

    let state: SharedState = Arc::new(AppState::from_config(&config));

    let app = Router::new()
        .route("/sources", get(routes::list_sources))
        .route("/sources/{name}/autocomplete", post(routes::autocomplete))
        .route("/sources/{name}/resolve", post(routes::resolve))
        .route("/status", get(routes::status))
        .route("/metrics", get(metrics::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind = args.bind.unwrap_or(config.service.bind);
    let port = args.port.unwrap_or(config.service.port);
    let addr = format!("{}:{}", bind, port);
    info!(%addr, sources = config.sources.len(), "docsearch-service listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
