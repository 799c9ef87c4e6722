//! In-memory DAO used by the integration tests
//!
//! Stores grants keyed by `(where, who, permission_id)` and consults
//! registered condition instances for grants that name a condition.

#![allow(dead_code)]

use alloy_sol_types::SolValue;
use condition_contracts::{DaoHandle, PermissionManager, ValidHashCondition};
use sdk::{
    validate_signature_permission_id, Address, Bytes, MultiTargetPermission, Operation, B256,
    ANY_ADDR, NO_CONDITION,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);

pub struct TestDao {
    address: Address,
    grants: RwLock<HashMap<(Address, Address, B256), Address>>,
    conditions: RwLock<HashMap<Address, Arc<RwLock<ValidHashCondition>>>>,
}

impl TestDao {
    pub fn deploy(address: Address) -> Arc<Self> {
        Arc::new(Self {
            address,
            grants: RwLock::new(HashMap::new()),
            conditions: RwLock::new(HashMap::new()),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn handle(self: &Arc<Self>) -> DaoHandle {
        DaoHandle::new(self.address, Arc::clone(self) as Arc<dyn PermissionManager>)
    }

    pub fn grant(&self, where_: Address, who: Address, permission_id: B256) {
        self.grants
            .write()
            .unwrap()
            .insert((where_, who, permission_id), NO_CONDITION);
    }

    pub fn apply(&self, permissions: &[MultiTargetPermission]) {
        let mut grants = self.grants.write().unwrap();
        for p in permissions {
            let key = (p.where_, p.who, p.permission_id);
            match p.operation {
                Operation::Grant | Operation::GrantWithCondition => {
                    grants.insert(key, p.condition);
                }
                Operation::Revoke => {
                    grants.remove(&key);
                }
            }
        }
    }

    pub fn register_condition(&self, condition: Arc<RwLock<ValidHashCondition>>) {
        let address = condition.read().unwrap().address();
        self.conditions.write().unwrap().insert(address, condition);
    }

    /// ERC-1271 style check routed through `VALIDATE_SIGNATURE_PERMISSION`
    pub fn is_valid_signature(&self, caller: Address, hash: B256, signature: &[u8]) -> bool {
        let data = (hash, Bytes::copy_from_slice(signature)).abi_encode_params();
        self.is_granted(self.address, caller, validate_signature_permission_id(), &data)
    }

    pub fn grant_count(&self) -> usize {
        self.grants.read().unwrap().len()
    }
}

impl PermissionManager for TestDao {
    fn is_granted(&self, where_: Address, who: Address, permission_id: B256, data: &[u8]) -> bool {
        let grants = self.grants.read().unwrap();
        for grantee in [who, ANY_ADDR] {
            let Some(condition) = grants.get(&(where_, grantee, permission_id)) else {
                continue;
            };
            if *condition == NO_CONDITION {
                return true;
            }
            if let Some(c) = self.conditions.read().unwrap().get(condition) {
                if c.read().unwrap().is_granted(where_, who, permission_id, data) {
                    return true;
                }
            }
        }
        false
    }
}
