// src/api/mod.rs

pub mod balances;
pub mod health;

use std::sync::Arc;

use crate::chains::{CChain, EvmChain, PChain, XChain};
use crate::config::Config;

/// Shared handles for the gateway: one client per namespace, built once at
/// startup and read-only for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub evm: Arc<dyn EvmChain>,
    pub x_chain: Arc<dyn XChain>,
    pub p_chain: Arc<dyn PChain>,
    pub c_chain: Arc<dyn CChain>,
    pub config: Config,
}
