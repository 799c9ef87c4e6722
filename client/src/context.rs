//! Client context
//!
//! A [`Context`] is the fully resolved configuration a [`crate::Client`]
//! runs with. It is built from optional [`ContextParams`] layered over
//! defaults with [`resolve`], which is pure: the same inputs always give
//! the same context and nothing is remembered between calls.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Plugin address used when none is configured
pub const DEFAULT_PLUGIN_ADDRESS: Address = address!("1234567890123456789012345678901234567890");

/// Plugin repo address used when none is configured
pub const DEFAULT_REPO_ADDRESS: Address = address!("2345678901234567890123456789012345678901");

pub const DEFAULT_NETWORK: &str = "goerli";

pub const DEFAULT_GAS_FEE_ESTIMATION_FACTOR: f64 = 0.625;

/// Optional context parameters
///
/// Every `None` falls back to the defaults passed to [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextParams {
    pub network: Option<String>,
    pub web3_providers: Option<Vec<String>>,
    pub graphql_nodes: Option<Vec<String>>,
    pub plugin_address: Option<Address>,
    pub repo_address: Option<Address>,
    pub plugin_setup_processor_address: Option<Address>,
    pub signer_address: Option<Address>,
    pub gas_fee_estimation_factor: Option<f64>,
}

impl ContextParams {
    /// Layer `higher` over `self`; fields set in `higher` win
    pub fn overlay(self, higher: ContextParams) -> ContextParams {
        ContextParams {
            network: higher.network.or(self.network),
            web3_providers: higher.web3_providers.or(self.web3_providers),
            graphql_nodes: higher.graphql_nodes.or(self.graphql_nodes),
            plugin_address: higher.plugin_address.or(self.plugin_address),
            repo_address: higher.repo_address.or(self.repo_address),
            plugin_setup_processor_address: higher
                .plugin_setup_processor_address
                .or(self.plugin_setup_processor_address),
            signer_address: higher.signer_address.or(self.signer_address),
            gas_fee_estimation_factor: higher
                .gas_fee_estimation_factor
                .or(self.gas_fee_estimation_factor),
        }
    }
}

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub network: String,
    pub web3_providers: Vec<String>,
    pub graphql_nodes: Vec<String>,
    pub plugin_address: Address,
    pub repo_address: Address,
    pub plugin_setup_processor_address: Option<Address>,
    pub signer_address: Option<Address>,
    pub gas_fee_estimation_factor: f64,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            web3_providers: Vec::new(),
            graphql_nodes: Vec::new(),
            plugin_address: DEFAULT_PLUGIN_ADDRESS,
            repo_address: DEFAULT_REPO_ADDRESS,
            plugin_setup_processor_address: None,
            signer_address: None,
            gas_fee_estimation_factor: DEFAULT_GAS_FEE_ESTIMATION_FACTOR,
        }
    }
}

impl Context {
    /// Resolve `params` over the built-in defaults
    pub fn from_params(params: &ContextParams) -> Self {
        resolve(params, &Context::default())
    }
}

/// Compute the effective context: explicit parameters over defaults
///
/// Each field falls back on its own default.
pub fn resolve(params: &ContextParams, defaults: &Context) -> Context {
    Context {
        network: params
            .network
            .clone()
            .unwrap_or_else(|| defaults.network.clone()),
        web3_providers: params
            .web3_providers
            .clone()
            .unwrap_or_else(|| defaults.web3_providers.clone()),
        graphql_nodes: params
            .graphql_nodes
            .clone()
            .unwrap_or_else(|| defaults.graphql_nodes.clone()),
        plugin_address: params.plugin_address.unwrap_or(defaults.plugin_address),
        repo_address: params.repo_address.unwrap_or(defaults.repo_address),
        plugin_setup_processor_address: params
            .plugin_setup_processor_address
            .or(defaults.plugin_setup_processor_address),
        signer_address: params.signer_address.or(defaults.signer_address),
        gas_fee_estimation_factor: params
            .gas_fee_estimation_factor
            .unwrap_or(defaults.gas_fee_estimation_factor),
    }
}
