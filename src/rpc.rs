use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{balances, AppState};
use crate::constants::JSONRPC_VERSION;
use crate::error::{ErrorObject, RpcError};

/// JSON-RPC 2.0 request envelope. `params` stays a raw value so shape
/// violations become invalid-params responses instead of transport-level
/// rejections.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    pub id: Value,
}

impl RpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: Some(result),
            error: None,
            id,
        }
    }

    fn error(id: Value, err: &RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result: None,
            error: Some(ErrorObject::from(err)),
            id,
        }
    }
}

/// How a method reports an arity shortfall.
#[derive(Clone, Copy)]
pub enum ArityFailure {
    InvalidParams,
    InsufficientParameters,
    Assertion,
}

impl ArityFailure {
    fn to_error(self) -> RpcError {
        match self {
            ArityFailure::InvalidParams => RpcError::InvalidParams,
            ArityFailure::InsufficientParameters => RpcError::InsufficientParameters,
            ArityFailure::Assertion => {
                RpcError::Assertion("Insufficient parameters!".to_string())
            }
        }
    }
}

/// Minimum positional arity per method, enforced ahead of every handler.
pub struct MethodSpec {
    pub name: &'static str,
    pub min_arity: usize,
    pub on_missing: ArityFailure,
}

pub const METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "getAssetID",
        min_arity: 0,
        on_missing: ArityFailure::InvalidParams,
    },
    MethodSpec {
        name: "getBalance",
        min_arity: 1,
        on_missing: ArityFailure::InvalidParams,
    },
    MethodSpec {
        name: "getAvaxBalance",
        min_arity: 1,
        on_missing: ArityFailure::InsufficientParameters,
    },
    MethodSpec {
        name: "getPBalance",
        min_arity: 1,
        on_missing: ArityFailure::InsufficientParameters,
    },
    MethodSpec {
        name: "getXBalance",
        min_arity: 1,
        on_missing: ArityFailure::InsufficientParameters,
    },
    MethodSpec {
        name: "getXBalanceAsset",
        min_arity: 2,
        on_missing: ArityFailure::Assertion,
    },
];

/// Positional parameters arrive as an array of strings, a single bare
/// string, or not at all. Anything else is an invalid-params violation;
/// element content is not inspected here.
pub fn normalize_params(params: Option<&Value>) -> Result<Vec<String>, RpcError> {
    match params {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(RpcError::InvalidParams)
            })
            .collect(),
        Some(_) => Err(RpcError::InvalidParams),
    }
}

/// POST /web3/
pub async fn handle(
    State(state): State<AppState>,
    payload: Result<Json<RpcRequest>, JsonRejection>,
) -> Json<RpcResponse> {
    let Ok(Json(request)) = payload else {
        return Json(RpcResponse::error(Value::Null, &RpcError::ParseError));
    };
    let id = request.id.clone();
    match dispatch(&state, &request.method, request.params.as_ref()).await {
        Ok(result) => Json(RpcResponse::result(id, result)),
        Err(err) => {
            tracing::debug!("{} failed: {}", request.method, err);
            Json(RpcResponse::error(id, &err))
        }
    }
}

/// Single translate-on-exit boundary: every gateway failure funnels through
/// the one `RpcError` → error-object conversion above.
pub(crate) async fn dispatch(
    state: &AppState,
    method: &str,
    params: Option<&Value>,
) -> Result<Value, RpcError> {
    let spec = METHODS
        .iter()
        .find(|m| m.name == method)
        .ok_or_else(|| RpcError::MethodNotFound(method.to_string()))?;

    let args = normalize_params(params)?;
    if args.len() < spec.min_arity {
        return Err(spec.on_missing.to_error());
    }

    match spec.name {
        "getAssetID" => balances::get_asset_id(state).await,
        "getBalance" => balances::get_balance(state, &args).await,
        "getAvaxBalance" => balances::get_avax_balance(state, &args).await,
        "getPBalance" => balances::get_p_balance(state, &args).await,
        "getXBalance" => balances::get_x_balance(state, &args).await,
        "getXBalanceAsset" => balances::get_x_balance_asset(state, &args).await,
        _ => Err(RpcError::MethodNotFound(method.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_strings_normalize_to_one_element() {
        // Memastikan parameter tunggal dinormalkan menjadi list satu elemen
        let bare = serde_json::json!("0xabc");
        assert_eq!(normalize_params(Some(&bare)).unwrap(), vec!["0xabc"]);
    }

    #[test]
    fn arrays_pass_through_in_order() {
        let list = serde_json::json!(["a", "b"]);
        assert_eq!(normalize_params(Some(&list)).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn absent_params_normalize_to_empty() {
        assert!(normalize_params(None).unwrap().is_empty());
        assert!(normalize_params(Some(&Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn non_string_params_are_invalid() {
        for params in [
            serde_json::json!(42),
            serde_json::json!({"address": "0xabc"}),
            serde_json::json!(["ok", 42]),
        ] {
            assert!(matches!(
                normalize_params(Some(&params)),
                Err(RpcError::InvalidParams)
            ));
        }
    }

    #[test]
    fn the_method_table_covers_the_full_surface() {
        let names: Vec<&str> = METHODS.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            [
                "getAssetID",
                "getBalance",
                "getAvaxBalance",
                "getPBalance",
                "getXBalance",
                "getXBalanceAsset"
            ]
        );
        let x_asset = METHODS.iter().find(|m| m.name == "getXBalanceAsset").unwrap();
        assert_eq!(x_asset.min_arity, 2);
    }

    #[test]
    fn error_responses_carry_code_message_and_data() {
        let response = RpcResponse::error(
            serde_json::json!(7),
            &RpcError::invalid_address("0xNotAnAddress"),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert_eq!(json["error"]["code"], -32602);
        assert_eq!(json["error"]["message"], "Invalid address");
        assert_eq!(json["error"]["data"], "0xNotAnAddress");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn result_responses_echo_the_request_id() {
        let response = RpcResponse::result(serde_json::json!("abc"), serde_json::json!("42"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["result"], "42");
        assert!(json.get("error").is_none());
    }
}
