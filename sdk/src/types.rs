//! Permission, setup and action types shared across the workspace

use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder `who` meaning "any address"
pub const ANY_ADDR: Address = address!("ffffffffffffffffffffffffffffffffffffffff");

/// `condition` value for permissions without a condition contract
pub const NO_CONDITION: Address = Address::ZERO;

/// Name hashed into [`set_hash_permission_id`]
pub const SET_HASH_PERMISSION: &str = "SET_HASH_PERMISSION";

/// Name hashed into [`validate_signature_permission_id`]
pub const VALIDATE_SIGNATURE_PERMISSION: &str = "VALIDATE_SIGNATURE_PERMISSION";

/// Permission required to validate or invalidate hashes on a condition
pub fn set_hash_permission_id() -> B256 {
    keccak256(SET_HASH_PERMISSION)
}

/// Permission on the DAO that gates ERC-1271 signature validation
pub fn validate_signature_permission_id() -> B256 {
    keccak256(VALIDATE_SIGNATURE_PERMISSION)
}

/// Operation applied by the permission manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operation {
    Grant = 0,
    Revoke = 1,
    GrantWithCondition = 2,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Grant => write!(f, "grant"),
            Operation::Revoke => write!(f, "revoke"),
            Operation::GrantWithCondition => write!(f, "grant-with-condition"),
        }
    }
}

/// A single permission change for the DAO's permission manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTargetPermission {
    pub operation: Operation,
    #[serde(rename = "where")]
    pub where_: Address,
    pub who: Address,
    pub condition: Address,
    pub permission_id: B256,
}

/// Setup data handed back to the plugin host framework
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedSetupData {
    pub helpers: Vec<Address>,
    pub permissions: Vec<MultiTargetPermission>,
}

/// Result of `prepareInstallation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationResult {
    pub plugin: Address,
    pub prepared_setup_data: PreparedSetupData,
}

impl InstallationResult {
    pub fn helpers(&self) -> &[Address] {
        &self.prepared_setup_data.helpers
    }

    pub fn permissions(&self) -> &[MultiTargetPermission] {
        &self.prepared_setup_data.permissions
    }
}

/// Input of `prepareUninstallation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupPayload {
    pub plugin: Address,
    pub current_helpers: Vec<Address>,
    pub data: Bytes,
}

impl SetupPayload {
    /// Payload for a plugin without helpers or extra data
    pub fn for_plugin(plugin: Address) -> Self {
        Self {
            plugin,
            current_helpers: Vec::new(),
            data: Bytes::new(),
        }
    }
}

/// A call the DAO executes on behalf of a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoAction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Release/build pair identifying a published plugin build
///
/// A release bump is breaking and cannot be updated into. A build bump
/// within the same release is backward compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionTag {
    pub release: u8,
    pub build: u16,
}

impl VersionTag {
    pub const fn new(release: u8, build: u16) -> Self {
        Self { release, build }
    }

    /// Whether an installed build `self` can be updated to `target`
    pub fn is_update_to(&self, target: &VersionTag) -> bool {
        self.release == target.release && target.build > self.build
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.release, self.build)
    }
}

/// Deployment pattern reported through `IPlugin.pluginType()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PluginType {
    Uups = 0,
    Cloneable = 1,
    Constructable = 2,
}
