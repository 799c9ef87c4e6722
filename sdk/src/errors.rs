//! Error types and handling
//!
//! This module provides the error type shared by the condition contract, its
//! setup and the client SDK. All errors implement the `PluginErrorExt` trait
//! which provides user-friendly hints and indicates whether errors are
//! recoverable.
//!
//! Every error aborts the operation that raised it. Contract state and
//! permission plans are never partially applied.

use alloy_primitives::{Address, B256};
use thiserror::Error;

/// Trait for plugin error extensions
///
/// This trait provides additional context for errors, including user-friendly
/// hints and recoverability information.
pub trait PluginErrorExt {
    /// Returns a user-friendly hint for the error
    fn user_hint(&self) -> &str;

    /// Returns whether the error is recoverable
    ///
    /// Recoverable errors can be retried or worked around once the caller
    /// fixes its input or environment. Non-recoverable errors mean the
    /// requested state change can never succeed as issued.
    fn is_recoverable(&self) -> bool;
}

/// Main plugin error type
///
/// # Error Categories
///
/// - **Contract**: permission and state transition failures
/// - **Codec**: malformed calldata
/// - **Query**: indexer misses and GraphQL failures
/// - **Transport**: HTTP and JSON-RPC failures
/// - **Configuration**: invalid or missing configuration
///
/// # Examples
///
/// ```
/// use alloy_primitives::B256;
/// use condition_sdk::errors::{PluginError, PluginErrorExt};
///
/// let error = PluginError::AlreadySet { hash: B256::ZERO, value: true };
/// assert!(!error.is_recoverable());
/// println!("Hint: {}", error.user_hint());
/// ```
#[derive(Debug, Error)]
pub enum PluginError {
    // Contract errors
    #[error("Unauthorized: dao {dao} denied {who} permission {permission_id} on {where_}")]
    Unauthorized {
        dao: Address,
        where_: Address,
        who: Address,
        permission_id: B256,
    },

    #[error("Value already set: hash {hash} is already {value}")]
    AlreadySet { hash: B256, value: bool },

    #[error("Contract is already initialized")]
    AlreadyInitialized,

    #[error("Contract is not initialized")]
    NotInitialized,

    // Codec errors
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    // Query errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("GraphQL error: {0}")]
    Graphql(String),

    // Transport errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginErrorExt for PluginError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Unauthorized { .. } => {
                "The caller lacks the required permission. Ask the DAO to grant it"
            }
            Self::AlreadySet { .. } => "The hash already has the requested validity",
            Self::AlreadyInitialized => "This plugin instance was already initialized",
            Self::NotInitialized => "This plugin instance has no DAO yet. Initialize it first",
            Self::MalformedInput(_) => "The calldata does not match the expected function",
            Self::NotFound(_) => "The indexer has no record for this request",
            Self::Graphql(_) => "The indexer rejected the query. Check the subgraph URL",
            Self::Network(_) => "Network operation failed. Check your connection",
            Self::Rpc { .. } => "The JSON-RPC node rejected the request. Check the provider URL",
            Self::Config(_) => "Check your config.toml file for errors",
            Self::Io(_) => "File system operation failed",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Retrying the same call can never succeed
            Self::AlreadySet { .. }
            | Self::AlreadyInitialized
            | Self::MalformedInput(_) => false,

            _ => true,
        }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedInput(e.to_string())
    }
}
