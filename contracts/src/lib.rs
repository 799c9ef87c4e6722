//! ValidHashCondition contracts
//!
//! This crate models the on-chain half of the plugin: the hash registry
//! that doubles as a permission condition, and the setup that deploys one
//! registry per DAO and computes the permission plans the DAO framework
//! applies on install and uninstall.

pub mod condition;
pub mod dao;
pub mod interfaces;
pub mod setup;

pub use condition::{ConditionEvent, ValidHashCondition, PROTOCOL_VERSION};
pub use dao::{DaoHandle, PermissionManager};
pub use setup::{PreparedInstallation, ValidHashConditionSetup};
