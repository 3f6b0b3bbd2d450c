use ethers::types::U256;
use serde_json::Value;

use crate::cb58;
use crate::chains::evm::is_address;
use crate::constants::P_CHAIN_PREFIX;
use crate::error::{Result, RpcError};

use super::AppState;

// Balance results serialize as decimal strings; a U256 does not survive a
// trip through an f64.
fn balance_result(balance: U256) -> Value {
    Value::String(balance.to_string())
}

fn first_arg<'a>(args: &'a [String], missing: RpcError) -> Result<&'a str> {
    args.first().map(String::as_str).ok_or(missing)
}

/// getBalance([address]). The one path that validates its address before
/// querying. Downstream failures fold into a generic invalid-params error;
/// the cause is logged, never surfaced.
pub async fn get_balance(state: &AppState, args: &[String]) -> Result<Value> {
    let addr = first_arg(args, RpcError::InvalidParams)?;
    if !is_address(addr) {
        return Err(RpcError::invalid_address(addr));
    }
    let balance = state.evm.native_balance(addr).await.map_err(|e| {
        tracing::warn!("eth balance lookup for {} failed: {}", addr, e);
        RpcError::InvalidParams
    })?;
    tracing::info!("Balance for {} is {}", addr, balance);
    Ok(balance_result(balance))
}

/// getAssetID(). Returns the network's primary asset identifier, CB58-encoded.
pub async fn get_asset_id(state: &AppState) -> Result<Value> {
    let raw = state
        .c_chain
        .native_asset_id()
        .await
        .map_err(RpcError::upstream)?;
    Ok(Value::String(cb58::encode(&raw)))
}

/// getAvaxBalance([address]). P-chain balance for the "P-"-aliased address.
pub async fn get_avax_balance(state: &AppState, args: &[String]) -> Result<Value> {
    let addr = first_arg(args, RpcError::InsufficientParameters)?;
    let p_addr = format!("{P_CHAIN_PREFIX}{addr}");
    let balance = state
        .p_chain
        .balance(&p_addr)
        .await
        .map_err(RpcError::upstream)?;
    Ok(balance_result(balance))
}

/// getPBalance([address]). The address is handed to the P chain as given.
pub async fn get_p_balance(state: &AppState, args: &[String]) -> Result<Value> {
    let addr = first_arg(args, RpcError::InsufficientParameters)?;
    let balance = state
        .p_chain
        .balance(addr)
        .await
        .map_err(RpcError::upstream)?;
    Ok(balance_result(balance))
}

/// getXBalance([address, assetID?]). Uses the explicit asset, or the primary
/// asset when the second parameter is absent.
pub async fn get_x_balance(state: &AppState, args: &[String]) -> Result<Value> {
    let addr = first_arg(args, RpcError::InsufficientParameters)?;
    let asset_id = match args.get(1) {
        Some(asset) => asset.clone(),
        None => {
            let raw = state
                .x_chain
                .native_asset_id()
                .await
                .map_err(RpcError::upstream)?;
            cb58::encode(&raw)
        }
    };
    let balance = state
        .x_chain
        .balance(addr, &asset_id)
        .await
        .map_err(RpcError::upstream)?;
    Ok(balance_result(balance))
}

/// getXBalanceAsset([address, assetID]). Both parameters required; the
/// shortfall surfaces as an assertion, not the normalized arity error.
pub async fn get_x_balance_asset(state: &AppState, args: &[String]) -> Result<Value> {
    if args.len() < 2 {
        return Err(RpcError::Assertion("Insufficient parameters!".to_string()));
    }
    let balance = state
        .x_chain
        .balance(&args[0], &args[1])
        .await
        .map_err(RpcError::upstream)?;
    Ok(balance_result(balance))
}
