//! Calldata encoders
//!
//! Encoders are pure: they build the bytes a DAO proposal carries and
//! never touch the network.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;

use contracts::interfaces::IValidHashCondition;
use sdk::DaoAction;

use crate::abi::IStorage;

/// Calldata for `storeNumber(uint256)`: selector followed by the value
pub fn encode_store_number(value: U256) -> Bytes {
    IStorage::storeNumberCall { _number: value }.abi_encode().into()
}

/// Builds DAO actions targeting the configured plugin
#[derive(Debug, Clone, Copy)]
pub struct Encoding {
    plugin_address: Address,
}

impl Encoding {
    pub fn new(plugin_address: Address) -> Self {
        Self { plugin_address }
    }

    pub fn plugin_address(&self) -> Address {
        self.plugin_address
    }

    /// Action storing `value` on the plugin
    pub fn store_number_action(&self, value: U256) -> DaoAction {
        self.action(encode_store_number(value))
    }

    /// Action marking `hash` valid
    pub fn validate_hash_action(&self, hash: B256) -> DaoAction {
        self.action(IValidHashCondition::validateHashCall { _hash: hash }.abi_encode().into())
    }

    /// Action marking `hash` invalid
    pub fn invalidate_hash_action(&self, hash: B256) -> DaoAction {
        self.action(
            IValidHashCondition::invalidateHashCall { _hash: hash }
                .abi_encode()
                .into(),
        )
    }

    fn action(&self, data: Bytes) -> DaoAction {
        DaoAction {
            to: self.plugin_address,
            value: U256::ZERO,
            data,
        }
    }
}
