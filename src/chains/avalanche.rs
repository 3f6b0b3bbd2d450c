use async_trait::async_trait;
use ethers::types::U256;
use serde::Deserialize;
use url::Url;

use super::{CChain, ChainError, PChain, XChain};
use crate::cb58;
use crate::constants::{
    C_CHAIN_AVAX_ENDPOINT, P_CHAIN_ENDPOINT, PRIMARY_ASSET_ALIAS, X_CHAIN_ENDPOINT,
};

fn rpc_request(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    })
}

/// Handle on one avalanchego node; the X/P/C API objects share it.
#[derive(Clone)]
pub struct AvalancheNode {
    base_url: Url,
    client: reqwest::Client,
}

impl AvalancheNode {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn x_chain(&self) -> XChainApi {
        XChainApi { node: self.clone() }
    }

    pub fn p_chain(&self) -> PChainApi {
        PChainApi { node: self.clone() }
    }

    pub fn c_chain(&self) -> CChainApi {
        CChainApi { node: self.clone() }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ChainError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ChainError::Malformed(format!("bad endpoint {endpoint}: {e}")))?;
        let request = rpc_request(method, params);

        let response = self.client.post(url).json(&request).send().await?;
        let envelope: RpcEnvelope<T> = response.json().await?;

        if let Some(err) = envelope.error {
            return Err(ChainError::Node {
                code: err.code,
                message: err.message,
            });
        }
        envelope.result.ok_or_else(|| {
            ChainError::Malformed(format!("{method} returned neither result nor error"))
        })
    }
}

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<NodeErrorBody>,
}

#[derive(Debug, Deserialize)]
struct NodeErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct AssetDescriptionResponse {
    #[serde(rename = "assetID")]
    asset_id: String,
}

// Balances arrive as decimal strings on current nodes and as bare numbers
// on older ones.
fn parse_amount(value: &serde_json::Value) -> Result<U256, ChainError> {
    match value {
        serde_json::Value::String(s) => U256::from_dec_str(s)
            .map_err(|e| ChainError::Malformed(format!("bad balance {s:?}: {e}"))),
        serde_json::Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| ChainError::Malformed(format!("bad balance number {n}"))),
        other => Err(ChainError::Malformed(format!("bad balance shape: {other}"))),
    }
}

fn decode_asset_id(encoded: &str) -> Result<Vec<u8>, ChainError> {
    cb58::decode(encoded)
        .map_err(|e| ChainError::Malformed(format!("bad asset id {encoded:?}: {e}")))
}

pub struct XChainApi {
    node: AvalancheNode,
}

pub struct PChainApi {
    node: AvalancheNode,
}

pub struct CChainApi {
    node: AvalancheNode,
}

#[async_trait]
impl XChain for XChainApi {
    async fn balance(&self, address: &str, asset_id: &str) -> Result<U256, ChainError> {
        let response: BalanceResponse = self
            .node
            .call(
                X_CHAIN_ENDPOINT,
                "avm.getBalance",
                serde_json::json!({ "address": address, "assetID": asset_id }),
            )
            .await?;
        parse_amount(&response.balance)
    }

    async fn native_asset_id(&self) -> Result<Vec<u8>, ChainError> {
        let response: AssetDescriptionResponse = self
            .node
            .call(
                X_CHAIN_ENDPOINT,
                "avm.getAssetDescription",
                serde_json::json!({ "assetID": PRIMARY_ASSET_ALIAS }),
            )
            .await?;
        decode_asset_id(&response.asset_id)
    }
}

#[async_trait]
impl PChain for PChainApi {
    async fn balance(&self, address: &str) -> Result<U256, ChainError> {
        let response: BalanceResponse = self
            .node
            .call(
                P_CHAIN_ENDPOINT,
                "platform.getBalance",
                serde_json::json!({ "addresses": [address] }),
            )
            .await?;
        parse_amount(&response.balance)
    }
}

#[async_trait]
impl CChain for CChainApi {
    async fn native_asset_id(&self) -> Result<Vec<u8>, ChainError> {
        let response: AssetDescriptionResponse = self
            .node
            .call(
                C_CHAIN_AVAX_ENDPOINT,
                "avax.getAssetDescription",
                serde_json::json!({ "assetID": PRIMARY_ASSET_ALIAS }),
            )
            .await?;
        decode_asset_id(&response.asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_request_sets_method_and_id() {
        // Memastikan payload RPC berisi method dan id default
        let req = rpc_request("avm.getBalance", serde_json::json!({}));
        assert_eq!(
            req.get("method").and_then(|v| v.as_str()),
            Some("avm.getBalance")
        );
        assert_eq!(req.get("id").and_then(|v| v.as_i64()), Some(1));
        assert_eq!(req.get("jsonrpc").and_then(|v| v.as_str()), Some("2.0"));
    }

    #[test]
    fn parse_amount_accepts_strings_and_numbers() {
        let from_string = parse_amount(&serde_json::json!("123456789012345678901234567890"));
        assert_eq!(
            from_string.unwrap(),
            U256::from_dec_str("123456789012345678901234567890").unwrap()
        );
        let from_number = parse_amount(&serde_json::json!(42u64));
        assert_eq!(from_number.unwrap(), U256::from(42u64));
    }

    #[test]
    fn parse_amount_rejects_other_shapes() {
        assert!(parse_amount(&serde_json::json!(1.5)).is_err());
        assert!(parse_amount(&serde_json::json!({"balance": "1"})).is_err());
        assert!(parse_amount(&serde_json::json!("not a number")).is_err());
    }

    #[test]
    fn decode_asset_id_round_trips_through_cb58() {
        let raw = vec![9u8; 32];
        assert_eq!(decode_asset_id(&cb58::encode(&raw)).unwrap(), raw);
        assert!(decode_asset_id("garbage!!").is_err());
    }

    #[test]
    fn envelope_surfaces_node_errors() {
        let envelope: RpcEnvelope<BalanceResponse> = serde_json::from_value(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32601, "message": "unknown method" }
        }))
        .unwrap();
        let err = envelope.error.unwrap();
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "unknown method");
    }
}
