//! ValidHashCondition SDK
//!
//! Shared library providing the error, permission and metadata types used
//! by the condition contract, its setup and the client.

/// Error types and handling
pub mod errors;

/// Permission, setup and action types
pub mod types;

/// Two-phase permission plans
pub mod permissions;

/// Plugin settings and metadata documents
pub mod metadata;

// Re-export commonly used types
pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use errors::{PluginError, PluginErrorExt};
pub use metadata::{BuildMetadata, ReleaseMetadata, VERSION};
pub use permissions::{PermissionPlan, PermissionTemplate, Target};
pub use types::{
    set_hash_permission_id, validate_signature_permission_id, DaoAction, InstallationResult,
    MultiTargetPermission, Operation, PluginType, PreparedSetupData, SetupPayload, VersionTag,
    ANY_ADDR, NO_CONDITION,
};

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, PluginError>;
