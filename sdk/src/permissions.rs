//! Permission plans for installing and uninstalling the condition
//!
//! A plan is built in two phases. The templates below name their targets
//! symbolically because the plugin address is unknown until deployment.
//! [`PermissionPlan::resolve`] then substitutes the concrete DAO and plugin
//! addresses and yields an immutable permission list.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::types::{
    set_hash_permission_id, validate_signature_permission_id, MultiTargetPermission, Operation,
    ANY_ADDR, NO_CONDITION,
};

/// Symbolic address slot in a permission template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// The DAO the plugin is installed into
    Dao,
    /// The plugin instance being installed or removed
    Plugin,
    /// `ANY_ADDR`, any caller
    AnyAddress,
    /// The zero address, no condition contract
    NoCondition,
    /// A fixed address known up front
    Fixed(Address),
}

impl Target {
    fn resolve(self, dao: Address, plugin: Address) -> Address {
        match self {
            Target::Dao => dao,
            Target::Plugin => plugin,
            Target::AnyAddress => ANY_ADDR,
            Target::NoCondition => NO_CONDITION,
            Target::Fixed(addr) => addr,
        }
    }
}

/// A permission whose address slots are still symbolic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTemplate {
    pub where_: Target,
    pub who: Target,
    pub condition: Target,
    pub permission_id: B256,
}

impl PermissionTemplate {
    /// Resolve into a concrete permission for `operation`
    pub fn resolve(
        &self,
        operation: Operation,
        dao: Address,
        plugin: Address,
    ) -> MultiTargetPermission {
        MultiTargetPermission {
            operation,
            where_: self.where_.resolve(dao, plugin),
            who: self.who.resolve(dao, plugin),
            condition: self.condition.resolve(dao, plugin),
            permission_id: self.permission_id,
        }
    }
}

/// Ordered permission templates applied together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPlan {
    templates: Vec<PermissionTemplate>,
}

impl PermissionPlan {
    pub fn new(templates: Vec<PermissionTemplate>) -> Self {
        Self { templates }
    }

    /// The plan of the valid-hash condition.
    ///
    /// 1. Anyone may ask the DAO to validate a signature, subject to the
    ///    plugin acting as condition.
    /// 2. The DAO may set hashes on the plugin, unconditionally.
    pub fn valid_hash_condition() -> Self {
        Self::new(vec![
            PermissionTemplate {
                where_: Target::Dao,
                who: Target::AnyAddress,
                condition: Target::Plugin,
                permission_id: validate_signature_permission_id(),
            },
            PermissionTemplate {
                where_: Target::Plugin,
                who: Target::Dao,
                condition: Target::NoCondition,
                permission_id: set_hash_permission_id(),
            },
        ])
    }

    pub fn templates(&self) -> &[PermissionTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Substitute concrete addresses, preserving template order
    pub fn resolve(
        &self,
        operation: Operation,
        dao: Address,
        plugin: Address,
    ) -> Vec<MultiTargetPermission> {
        self.templates
            .iter()
            .map(|t| t.resolve(operation, dao, plugin))
            .collect()
    }

    pub fn grants(&self, dao: Address, plugin: Address) -> Vec<MultiTargetPermission> {
        self.resolve(Operation::Grant, dao, plugin)
    }

    pub fn revokes(&self, dao: Address, plugin: Address) -> Vec<MultiTargetPermission> {
        self.resolve(Operation::Revoke, dao, plugin)
    }
}
