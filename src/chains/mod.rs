pub mod avalanche;
pub mod evm;

use async_trait::async_trait;
use ethers::types::U256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("provider error: {0}")]
    Provider(String),
}

/// Balance provider for the EVM-compatible namespace.
#[async_trait]
pub trait EvmChain: Send + Sync {
    async fn native_balance(&self, address: &str) -> Result<U256, ChainError>;
}

/// X-chain client: per-asset balances plus the primary asset identifier.
#[async_trait]
pub trait XChain: Send + Sync {
    async fn balance(&self, address: &str, asset_id: &str) -> Result<U256, ChainError>;
    async fn native_asset_id(&self) -> Result<Vec<u8>, ChainError>;
}

/// P-chain client.
#[async_trait]
pub trait PChain: Send + Sync {
    async fn balance(&self, address: &str) -> Result<U256, ChainError>;
}

/// C-chain avax API client; only the primary asset identifier is queried.
#[async_trait]
pub trait CChain: Send + Sync {
    async fn native_asset_id(&self) -> Result<Vec<u8>, ChainError>;
}
