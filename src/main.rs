use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod api;
mod cb58;
mod chains;
mod config;
mod constants;
mod error;
mod rpc;

use chains::avalanche::AvalancheNode;
use chains::evm::EthersEvm;
use config::Config;
use constants::LISTENING_PATH;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web3_balance_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Web3 Balance Gateway");
    tracing::info!("Environment: {}", config.environment);

    // Chain clients are built once and shared read-only by every request.
    let evm = EthersEvm::from_config(&config)
        .map_err(|e| anyhow::anyhow!("EVM provider init failed: {e}"))?;
    let node = AvalancheNode::new(Url::parse(&config.avalanche_node_url)?);

    let app_state = api::AppState {
        evm: Arc::new(evm),
        x_chain: Arc::new(node.x_chain()),
        p_chain: Arc::new(node.p_chain()),
        c_chain: Arc::new(node.c_chain()),
        config: config.clone(),
    };

    let app = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!("Listening on {}{}", addr, LISTENING_PATH);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: api::AppState) -> Router {
    let cors = cors_from_config(&state.config);

    Router::new()
        .route("/health", get(api::health::health_check))
        .route(LISTENING_PATH, post(rpc::handle))
        .layer(cors)
        .with_state(state)
}

fn cors_from_config(config: &Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    if raw.is_empty() || raw == "*" {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("No valid CORS origins parsed; falling back to permissive");
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
