//! Ethereum JSON-RPC transport
//!
//! Only read calls are made here: `eth_call`, gas estimation and fee data.
//! Providers are tried in order, skipping unreachable ones.

use alloy_primitives::{Address, Bytes, U256};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sdk::{PluginError, Result};

/// JSON-RPC 2.0 "Parse error" code, reused for unreadable responses
const JSON_RPC_PARSE_ERROR: i64 = -32700;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockHeader {
    base_fee_per_gas: Option<U256>,
}

/// Client for one or more equivalent JSON-RPC providers
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    providers: Vec<String>,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(http: Client, providers: Vec<String>) -> Self {
        Self {
            http,
            providers,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Issue `method` with `params`, returning the decoded `result`
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        if self.providers.is_empty() {
            return Err(PluginError::Config(
                "No web3 providers configured".to_string(),
            ));
        }

        let mut last_error = None;
        for provider in &self.providers {
            match self.request_provider(provider, method, &params).await {
                Err(PluginError::Network(msg)) => {
                    tracing::warn!("Web3 provider {} unavailable: {}", provider, msg);
                    last_error = Some(PluginError::Network(msg));
                }
                other => return other,
            }
        }

        Err(last_error
            .unwrap_or_else(|| PluginError::Network("All web3 providers failed".to_string())))
    }

    async fn request_provider<T: DeserializeOwned>(
        &self,
        provider: &str,
        method: &str,
        params: &Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("JSON-RPC {} #{} to {}", method, id, provider);

        let response = self
            .http
            .post(provider)
            .json(&body)
            .send()
            .await
            .map_err(|e| PluginError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PluginError::Network(format!(
                "Provider {} returned {}",
                provider, status
            )));
        }

        let parsed: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| PluginError::Rpc {
                code: JSON_RPC_PARSE_ERROR,
                message: format!("Invalid JSON-RPC response: {}", e),
            })?;

        if let Some(error) = parsed.error {
            return Err(PluginError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        parsed.result.ok_or_else(|| PluginError::Rpc {
            code: 0,
            message: format!("{} returned no result", method),
        })
    }

    /// `eth_call` against the latest block
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    /// `eth_estimateGas` for a call from `from` (if known) to `to`
    pub async fn estimate_gas(&self, from: Option<Address>, to: Address, data: Bytes) -> Result<U256> {
        let mut tx = json!({ "to": to, "data": data });
        if let Some(from) = from {
            tx["from"] = json!(from);
        }
        self.request("eth_estimateGas", json!([tx])).await
    }

    /// EIP-1559 max fee: twice the latest base fee plus the suggested tip
    ///
    /// Falls back to `eth_gasPrice` on chains without a base fee.
    pub async fn max_fee_per_gas(&self) -> Result<U256> {
        let block: BlockHeader = self
            .request("eth_getBlockByNumber", json!(["latest", false]))
            .await?;

        match block.base_fee_per_gas {
            Some(base_fee) => {
                let tip: U256 = self.request("eth_maxPriorityFeePerGas", json!([])).await?;
                Ok(base_fee.saturating_mul(U256::from(2)).saturating_add(tip))
            }
            None => self.request("eth_gasPrice", json!([])).await,
        }
    }
}
