use serde::Serialize;
use thiserror::Error;

use crate::chains::ChainError;

// JSON-RPC error codes used by the gateway surface.
pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const INSUFFICIENT_PARAMETERS: i64 = -32000;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Invalid address")]
    InvalidAddress { address: String },

    #[error("Invalid params")]
    InvalidParams,

    #[error("Insufficient parameters")]
    InsufficientParameters,

    /// Arity violation reported as a bare assertion on the internal-error
    /// path rather than the normalized insufficient-parameters code.
    #[error("{0}")]
    Assertion(String),

    /// Downstream chain-client failure surfaced without remapping.
    #[error("{0}")]
    Upstream(String),

    #[error("Method not found")]
    MethodNotFound(String),

    #[error("Parse error")]
    ParseError,
}

impl RpcError {
    pub fn invalid_address(address: &str) -> Self {
        RpcError::InvalidAddress {
            address: address.to_string(),
        }
    }

    pub fn upstream(err: ChainError) -> Self {
        RpcError::Upstream(err.to_string())
    }

    pub fn code(&self) -> i64 {
        match self {
            RpcError::InvalidAddress { .. } | RpcError::InvalidParams => INVALID_PARAMS,
            RpcError::InsufficientParameters => INSUFFICIENT_PARAMETERS,
            RpcError::Assertion(_) | RpcError::Upstream(_) => INTERNAL_ERROR,
            RpcError::MethodNotFound(_) => METHOD_NOT_FOUND,
            RpcError::ParseError => PARSE_ERROR,
        }
    }

    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            RpcError::InvalidAddress { address } => {
                Some(serde_json::Value::String(address.clone()))
            }
            RpcError::MethodNotFound(method) => Some(serde_json::Value::String(method.clone())),
            _ => None,
        }
    }
}

/// Wire shape of a JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl From<&RpcError> for ErrorObject {
    fn from(err: &RpcError) -> Self {
        ErrorObject {
            code: err.code(),
            message: err.to_string(),
            data: err.data(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
