use serde::Deserialize;
use std::env;
use url::Url;

use crate::constants::DEFAULT_AVALANCHE_NODE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Upstream chain nodes
    pub ethereum_rpc_url: String,
    pub avalanche_node_url: String,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            ethereum_rpc_url: env::var("ETHEREUM_RPC_URL")?,
            avalanche_node_url: env::var("AVALANCHE_NODE_URL")
                .unwrap_or_else(|_| DEFAULT_AVALANCHE_NODE_URL.to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.ethereum_rpc_url.trim().is_empty() {
            anyhow::bail!("ETHEREUM_RPC_URL is empty");
        }
        if self.avalanche_node_url.trim().is_empty() {
            anyhow::bail!("AVALANCHE_NODE_URL is empty");
        }
        Url::parse(&self.avalanche_node_url)
            .map_err(|e| anyhow::anyhow!("AVALANCHE_NODE_URL is not a valid URL: {e}"))?;

        if self.ethereum_rpc_url.starts_with("ws") {
            tracing::warn!("ETHEREUM_RPC_URL is a websocket URL; the provider speaks HTTP");
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}
