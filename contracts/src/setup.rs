//! ValidHashConditionSetup: deploys conditions and computes permission deltas
//!
//! The setup never touches the permission manager itself. It hands the
//! framework a plan of grants (on install) or revokes (on uninstall) and the
//! framework decides whether and when to apply it.

use alloy_primitives::Address;
use tracing::{debug, info, warn};

use sdk::{
    InstallationResult, MultiTargetPermission, PermissionPlan, PreparedSetupData, Result,
    SetupPayload,
};

use crate::condition::ValidHashCondition;
use crate::dao::DaoHandle;

/// A deployed condition together with the setup data describing it
#[derive(Debug)]
pub struct PreparedInstallation {
    pub plugin: ValidHashCondition,
    pub result: InstallationResult,
}

/// Setup contract for [`ValidHashCondition`]
#[derive(Debug)]
pub struct ValidHashConditionSetup {
    address: Address,
    implementation: Address,
    nonce: u64,
    plan: PermissionPlan,
}

impl ValidHashConditionSetup {
    /// Deploy the setup at `address`
    ///
    /// Contract nonces start at 1, so the base implementation takes nonce 1
    /// and plugin instances start at nonce 2.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            implementation: address.create(1),
            nonce: 2,
            plan: PermissionPlan::valid_hash_condition(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Base contract every installed proxy points at
    pub fn implementation(&self) -> Address {
        self.implementation
    }

    /// Address the next `prepare_installation` will deploy to
    pub fn next_plugin_address(&self) -> Address {
        self.address.create(self.nonce)
    }

    /// Deploy and initialize a condition for `dao`
    ///
    /// `init_data` carries the ABI-encoded installation inputs. This build
    /// declares none, so any payload is ignored.
    pub fn prepare_installation(
        &mut self,
        dao: DaoHandle,
        init_data: &[u8],
    ) -> Result<PreparedInstallation> {
        if !init_data.is_empty() {
            warn!(
                "Ignoring {} bytes of installation data; this build takes no inputs",
                init_data.len()
            );
        }

        let plugin_address = self.next_plugin_address();
        let dao_address = dao.address();

        let mut plugin = ValidHashCondition::new(plugin_address);
        plugin.initialize(dao)?;
        self.nonce += 1;

        let result = InstallationResult {
            plugin: plugin_address,
            prepared_setup_data: PreparedSetupData {
                helpers: Vec::new(),
                permissions: self.plan.grants(dao_address, plugin_address),
            },
        };

        info!(
            "Prepared installation of {} for dao {}",
            plugin_address, dao_address
        );

        Ok(PreparedInstallation { plugin, result })
    }

    /// Revocations removing `payload.plugin` from `dao`
    pub fn prepare_uninstallation(
        &self,
        dao: Address,
        payload: &SetupPayload,
    ) -> Vec<MultiTargetPermission> {
        debug!(
            "Preparing uninstallation of {} from dao {}",
            payload.plugin, dao
        );
        self.plan.revokes(dao, payload.plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::PermissionManager;
    use alloy_primitives::B256;
    use sdk::Operation;
    use std::sync::Arc;

    struct DenyAll;

    impl PermissionManager for DenyAll {
        fn is_granted(&self, _where: Address, _who: Address, _id: B256, _data: &[u8]) -> bool {
            false
        }
    }

    fn dao(byte: u8) -> DaoHandle {
        DaoHandle::new(Address::repeat_byte(byte), Arc::new(DenyAll))
    }

    #[test]
    fn test_installations_get_distinct_addresses() {
        let mut setup = ValidHashConditionSetup::new(Address::repeat_byte(0x5e));

        let first = setup.prepare_installation(dao(0xd1), &[]).unwrap();
        let second = setup.prepare_installation(dao(0xd2), &[]).unwrap();

        assert_ne!(first.result.plugin, second.result.plugin);
        assert_ne!(first.result.plugin, setup.implementation());
        assert_eq!(first.plugin.dao(), Some(Address::repeat_byte(0xd1)));
        assert_eq!(second.plugin.dao(), Some(Address::repeat_byte(0xd2)));
    }

    #[test]
    fn test_addresses_follow_contract_nonces() {
        let setup_address = Address::repeat_byte(0x5e);
        let mut setup = ValidHashConditionSetup::new(setup_address);

        assert_eq!(setup.implementation(), setup_address.create(1));
        assert_eq!(setup.next_plugin_address(), setup_address.create(2));

        let first = setup.prepare_installation(dao(0xd1), &[]).unwrap();
        let second = setup.prepare_installation(dao(0xd2), &[]).unwrap();

        assert_eq!(first.result.plugin, setup_address.create(2));
        assert_eq!(second.result.plugin, setup_address.create(3));
    }

    #[test]
    fn test_uninstallation_is_pure() {
        let setup = ValidHashConditionSetup::new(Address::repeat_byte(0x5e));
        let payload = SetupPayload::for_plugin(Address::ZERO);
        let before = setup.next_plugin_address();

        let revokes = setup.prepare_uninstallation(Address::repeat_byte(0xd1), &payload);

        assert_eq!(revokes.len(), 2);
        assert!(revokes.iter().all(|p| p.operation == Operation::Revoke));
        assert_eq!(setup.next_plugin_address(), before);
    }
}
