//! ValidHashCondition client
//!
//! Off-chain access to the plugin: calldata encoding and decoding, indexer
//! queries, gas fee estimation and the `vhc` command line.

pub mod abi;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod decoding;
pub mod encoding;
pub mod estimation;
pub mod graphql;
pub mod handlers;
pub mod methods;
pub mod rpc;
pub mod telemetry;

pub use client::{Client, ClientCore};
pub use context::{resolve, Context, ContextParams};
pub use decoding::{decode_store_number, Decoding};
pub use encoding::{encode_store_number, Encoding};
pub use estimation::{gas_fee, Estimation, GasFeeEstimation, InstallationEstimateParams};
pub use methods::{Methods, NumberListItem, NumbersQueryParams, NumbersSortBy, SortDirection};
