use std::str::FromStr;

use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, U256},
    utils::to_checksum,
};

use super::{ChainError, EvmChain};
use crate::config::Config;

/// EVM balance provider backed by an ethers JSON-RPC provider.
pub struct EthersEvm {
    provider: Provider<Http>,
}

impl EthersEvm {
    pub fn from_config(config: &Config) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(&config.ethereum_rpc_url)
            .map_err(|e| ChainError::Provider(format!("Invalid EVM RPC URL: {}", e)))?;
        Ok(Self { provider })
    }
}

#[async_trait]
impl EvmChain for EthersEvm {
    async fn native_balance(&self, address: &str) -> Result<U256, ChainError> {
        let addr = Address::from_str(address)
            .map_err(|e| ChainError::Provider(format!("Invalid EVM address: {}", e)))?;
        self.provider
            .get_balance(addr, None)
            .await
            .map_err(|e| ChainError::Provider(e.to_string()))
    }
}

/// Returns true iff `value` is a well-formed EVM address: 0x-prefixed
/// 40-digit hex, with valid EIP-55 checksum casing when the hex is
/// mixed-case. Single-case hex carries no checksum information and is
/// accepted as-is.
pub fn is_address(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    if !has_upper || !has_lower {
        return true;
    }
    let Ok(parsed) = Address::from_str(value) else {
        return false;
    };
    to_checksum(&parsed, None) == value
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference addresses from the EIP-55 test set.
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn accepts_checksummed_addresses() {
        for addr in CHECKSUMMED {
            assert!(is_address(addr), "{addr}");
        }
    }

    #[test]
    fn accepts_single_case_hex() {
        for addr in CHECKSUMMED {
            assert!(is_address(&addr.to_lowercase()));
        }
        assert!(is_address("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn rejects_bad_checksum_casing() {
        // Memastikan satu huruf dengan kapitalisasi salah ditolak
        assert!(!is_address("0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(!is_address(""));
        assert!(!is_address("0xNotAnAddress"));
        assert!(!is_address("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe"));
        assert!(!is_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed0"));
    }
}
