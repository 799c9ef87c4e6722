//! Configuration management
//!
//! The `vhc` configuration lives in TOML at `~/.vhc/config.toml`.
//!
//! # Configuration Sections
//!
//! - **core**: log level
//! - **network**: network name, web3 providers, GraphQL nodes, fee factor
//! - **plugin**: optional contract addresses overriding the defaults
//!
//! The `[network]` and `[plugin]` tables convert into [`ContextParams`], so
//! anything left out here falls back to the client defaults.
//!
//! # Examples
//!
//! ```no_run
//! use condition_client::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_create()?;
//! println!("Network: {}", config.network.name);
//! # Ok(())
//! # }
//! ```

use alloy_primitives::Address;
use sdk::PluginError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{ContextParams, DEFAULT_GAS_FEE_ESTIMATION_FACTOR, DEFAULT_NETWORK};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub plugin: PluginConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_network_name")]
    pub name: String,

    /// JSON-RPC endpoints, tried in order
    #[serde(default)]
    pub web3_providers: Vec<String>,

    /// Subgraph endpoints, tried in order
    #[serde(default)]
    pub graphql_nodes: Vec<String>,

    /// Share of the max fee reported as the average (0.0-1.0]
    #[serde(default = "default_gas_fee_estimation_factor")]
    pub gas_fee_estimation_factor: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_setup_processor_address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<Address>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_network_name() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_gas_fee_estimation_factor() -> f64 {
    DEFAULT_GAS_FEE_ESTIMATION_FACTOR
}

fn default_web3_provider() -> String {
    "http://localhost:8545".to_string()
}

fn default_graphql_node() -> String {
    "http://localhost:8000/subgraphs/name/condition".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network_name(),
            web3_providers: vec![default_web3_provider()],
            graphql_nodes: vec![default_graphql_node()],
            gas_fee_estimation_factor: default_gas_fee_estimation_factor(),
        }
    }
}

impl Config {
    /// Load configuration from `~/.vhc/config.toml`, writing defaults first
    /// if the file does not exist
    pub fn load_or_create() -> Result<Self, PluginError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PluginError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PluginError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| PluginError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Write the default configuration to `path` and return it
    pub fn create_default(path: &Path) -> Result<Self, PluginError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PluginError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config = Self::default_config();
        config.validate()?;

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| PluginError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| PluginError::Config(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Created default configuration at {:?}", path);

        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf, PluginError> {
        let home = dirs::home_dir()
            .ok_or_else(|| PluginError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".vhc").join("config.toml"))
    }

    pub fn default_config() -> Self {
        Self {
            core: CoreConfig::default(),
            network: NetworkConfig::default(),
            plugin: PluginConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), PluginError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(PluginError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        let factor = self.network.gas_fee_estimation_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(PluginError::Config(
                "gas_fee_estimation_factor must be in (0.0, 1.0]".to_string(),
            ));
        }

        for url in self
            .network
            .web3_providers
            .iter()
            .chain(&self.network.graphql_nodes)
        {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(PluginError::Config(format!(
                    "Endpoint '{}' must be an http(s) URL",
                    url
                )));
            }
        }

        Ok(())
    }

    /// Context parameters described by this file
    ///
    /// Empty endpoint lists are left unset so the defaults apply.
    pub fn to_context_params(&self) -> ContextParams {
        let non_empty = |list: &Vec<String>| (!list.is_empty()).then(|| list.clone());

        ContextParams {
            network: Some(self.network.name.clone()),
            web3_providers: non_empty(&self.network.web3_providers),
            graphql_nodes: non_empty(&self.network.graphql_nodes),
            plugin_address: self.plugin.plugin_address,
            repo_address: self.plugin.repo_address,
            plugin_setup_processor_address: self.plugin.plugin_setup_processor_address,
            signer_address: self.plugin.signer_address,
            gas_fee_estimation_factor: Some(self.network.gas_fee_estimation_factor),
        }
    }
}
