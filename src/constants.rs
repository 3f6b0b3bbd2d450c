/// Application constants

// Avalanche chain aliasing
pub const P_CHAIN_PREFIX: &str = "P-";
pub const PRIMARY_ASSET_ALIAS: &str = "AVAX";

// avalanchego API endpoints, relative to the node base URL
pub const X_CHAIN_ENDPOINT: &str = "/ext/bc/X";
pub const P_CHAIN_ENDPOINT: &str = "/ext/bc/P";
pub const C_CHAIN_AVAX_ENDPOINT: &str = "/ext/bc/C/avax";

// JSON-RPC surface
pub const JSONRPC_VERSION: &str = "2.0";
pub const LISTENING_PATH: &str = "/web3/";

// Defaults
pub const DEFAULT_AVALANCHE_NODE_URL: &str = "https://avalanche-mainnet-rpc.allthatnode.com";
