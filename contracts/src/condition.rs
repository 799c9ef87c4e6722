//! ValidHashCondition: a permission-gated registry of valid hashes
//!
//! Holders of `SET_HASH_PERMISSION` on the instance may validate and
//! invalidate 32-byte hashes. Through `is_granted` the instance also acts as
//! a permission condition: the DAO asks it whether the hash behind a
//! signature request is currently valid.
//!
//! Every mutating call either commits its state change together with its
//! event, or returns an error and leaves state untouched.

use alloy_primitives::{Address, Bytes, FixedBytes, B256};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use std::collections::HashSet;
use tracing::debug;

use sdk::{set_hash_permission_id, PluginError, PluginType, Result};

use crate::dao::DaoHandle;
use crate::interfaces::{self, IValidHashCondition};

/// Framework protocol version this contract was built against
pub const PROTOCOL_VERSION: [u8; 3] = [1, 4, 0];

/// Notification emitted by a successful state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionEvent {
    HashValidated(B256),
    HashInvalidated(B256),
}

impl ConditionEvent {
    pub fn hash(&self) -> B256 {
        match self {
            ConditionEvent::HashValidated(h) | ConditionEvent::HashInvalidated(h) => *h,
        }
    }

    /// First log topic, the keccak of the event signature
    pub fn topic0(&self) -> B256 {
        match self {
            ConditionEvent::HashValidated(_) => IValidHashCondition::HashValidated::SIGNATURE_HASH,
            ConditionEvent::HashInvalidated(_) => {
                IValidHashCondition::HashInvalidated::SIGNATURE_HASH
            }
        }
    }

    /// ABI-encoded log data
    pub fn log_data(&self) -> Vec<u8> {
        match *self {
            ConditionEvent::HashValidated(hash) => {
                IValidHashCondition::HashValidated { hash }.encode_data()
            }
            ConditionEvent::HashInvalidated(hash) => {
                IValidHashCondition::HashInvalidated { hash }.encode_data()
            }
        }
    }
}

/// One deployed condition instance
#[derive(Debug)]
pub struct ValidHashCondition {
    address: Address,
    dao: Option<DaoHandle>,
    valid_hashes: HashSet<B256>,
    logs: Vec<ConditionEvent>,
}

impl ValidHashCondition {
    /// A freshly deployed, uninitialized instance at `address`
    pub fn new(address: Address) -> Self {
        Self {
            address,
            dao: None,
            valid_hashes: HashSet::new(),
            logs: Vec::new(),
        }
    }

    /// Bind the instance to the DAO whose permissions guard it
    pub fn initialize(&mut self, dao: DaoHandle) -> Result<()> {
        if self.dao.is_some() {
            return Err(PluginError::AlreadyInitialized);
        }
        debug!("Initializing condition {} for dao {}", self.address, dao.address());
        self.dao = Some(dao);
        Ok(())
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Address of the owning DAO, `None` before initialization
    pub fn dao(&self) -> Option<Address> {
        self.dao.as_ref().map(DaoHandle::address)
    }

    /// Mark `hash` as valid
    ///
    /// # Errors
    ///
    /// - `NotInitialized` before `initialize`
    /// - `Unauthorized` if `sender` lacks `SET_HASH_PERMISSION` on this instance
    /// - `AlreadySet { value: true }` if the hash is already valid
    pub fn validate_hash(&mut self, sender: Address, hash: B256) -> Result<ConditionEvent> {
        let calldata = IValidHashCondition::validateHashCall { _hash: hash }.abi_encode();
        self.auth(sender, &calldata)?;

        if self.valid_hashes.contains(&hash) {
            return Err(PluginError::AlreadySet { hash, value: true });
        }

        self.valid_hashes.insert(hash);
        Ok(self.emit(ConditionEvent::HashValidated(hash)))
    }

    /// Mark `hash` as invalid
    ///
    /// # Errors
    ///
    /// - `NotInitialized` before `initialize`
    /// - `Unauthorized` if `sender` lacks `SET_HASH_PERMISSION` on this instance
    /// - `AlreadySet { value: false }` if the hash is not valid
    pub fn invalidate_hash(&mut self, sender: Address, hash: B256) -> Result<ConditionEvent> {
        let calldata = IValidHashCondition::invalidateHashCall { _hash: hash }.abi_encode();
        self.auth(sender, &calldata)?;

        if !self.valid_hashes.remove(&hash) {
            return Err(PluginError::AlreadySet { hash, value: false });
        }

        Ok(self.emit(ConditionEvent::HashInvalidated(hash)))
    }

    pub fn is_valid(&self, hash: B256) -> bool {
        self.valid_hashes.contains(&hash)
    }

    /// `IPermissionCondition.isGranted`
    ///
    /// `data` is `abi.encode(bytes32 hash, bytes signature)` as forwarded by
    /// the DAO's signature validation. Only the hash is consulted.
    pub fn is_granted(
        &self,
        _where: Address,
        _who: Address,
        _permission_id: B256,
        data: &[u8],
    ) -> bool {
        match <(B256, Bytes)>::abi_decode_params(data, true) {
            Ok((hash, _signature)) => self.is_valid(hash),
            Err(e) => {
                debug!("Condition {} got undecodable data: {}", self.address, e);
                false
            }
        }
    }

    /// `IERC165.supportsInterface`
    pub fn supports_interface(&self, interface_id: FixedBytes<4>) -> bool {
        interfaces::supported_interface_ids().contains(&interface_id)
    }

    pub fn plugin_type(&self) -> PluginType {
        PluginType::Uups
    }

    pub fn protocol_version(&self) -> [u8; 3] {
        PROTOCOL_VERSION
    }

    /// Events emitted so far, oldest first
    pub fn logs(&self) -> &[ConditionEvent] {
        &self.logs
    }

    fn auth(&self, sender: Address, calldata: &[u8]) -> Result<()> {
        let dao = self.dao.as_ref().ok_or(PluginError::NotInitialized)?;
        dao.require(self.address, sender, set_hash_permission_id(), calldata)
    }

    fn emit(&mut self, event: ConditionEvent) -> ConditionEvent {
        debug!("Condition {} emitted {:?}", self.address, event);
        self.logs.push(event);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::PermissionManager;
    use alloy_primitives::keccak256;
    use std::sync::Arc;

    struct AllowOnly(Address);

    impl PermissionManager for AllowOnly {
        fn is_granted(&self, _where: Address, who: Address, _id: B256, _data: &[u8]) -> bool {
            who == self.0
        }
    }

    fn initialized(validator: Address) -> ValidHashCondition {
        let mut condition = ValidHashCondition::new(Address::repeat_byte(0x01));
        let dao = DaoHandle::new(Address::repeat_byte(0xda), Arc::new(AllowOnly(validator)));
        condition.initialize(dao).unwrap();
        condition
    }

    #[test]
    fn test_gated_calls_require_initialization() {
        let mut condition = ValidHashCondition::new(Address::repeat_byte(0x01));
        let result = condition.validate_hash(Address::ZERO, B256::ZERO);
        assert!(matches!(result, Err(PluginError::NotInitialized)));
        assert_eq!(condition.dao(), None);
    }

    #[test]
    fn test_unauthorized_leaves_state_unchanged() {
        let alice = Address::repeat_byte(0xa1);
        let bob = Address::repeat_byte(0xb0);
        let mut condition = initialized(alice);
        let hash = keccak256("Hi!");

        assert!(condition.validate_hash(bob, hash).is_err());
        assert!(!condition.is_valid(hash));
        assert!(condition.logs().is_empty());
    }

    #[test]
    fn test_event_encoding() {
        let hash = keccak256("Hi!");
        let event = ConditionEvent::HashValidated(hash);

        assert_eq!(event.topic0(), keccak256("HashValidated(bytes32)"));
        assert_eq!(event.log_data(), hash.to_vec());
        assert_eq!(
            ConditionEvent::HashInvalidated(hash).topic0(),
            keccak256("HashInvalidated(bytes32)")
        );
    }

    #[test]
    fn test_is_granted_reads_hash_from_data() {
        let alice = Address::repeat_byte(0xa1);
        let mut condition = initialized(alice);
        let hash = keccak256("Hi!");
        let data = (hash, Bytes::from(vec![0x12, 0x34])).abi_encode_params();

        assert!(!condition.is_granted(Address::ZERO, Address::ZERO, B256::ZERO, &data));
        condition.validate_hash(alice, hash).unwrap();
        assert!(condition.is_granted(Address::ZERO, Address::ZERO, B256::ZERO, &data));
    }

    #[test]
    fn test_is_granted_rejects_garbage() {
        let condition = initialized(Address::ZERO);
        assert!(!condition.is_granted(Address::ZERO, Address::ZERO, B256::ZERO, &[0xde, 0xad]));
    }
}
