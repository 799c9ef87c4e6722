//! Handle to the DAO that owns a plugin
//!
//! The permission manager lives in the DAO framework. Contracts here only
//! ask it whether a permission is granted; they never change grants.

use alloy_primitives::{Address, B256};
use std::fmt;
use std::sync::Arc;

use sdk::PluginError;

/// Read side of the DAO's permission manager (implemented by the framework)
pub trait PermissionManager: Send + Sync {
    /// Whether `who` holds `permission_id` on `where_`
    ///
    /// `data` is forwarded to the permission's condition, if any.
    fn is_granted(&self, where_: Address, who: Address, permission_id: B256, data: &[u8]) -> bool;
}

/// Handle for permission checks against one DAO
#[derive(Clone)]
pub struct DaoHandle {
    address: Address,
    inner: Arc<dyn PermissionManager>,
}

impl DaoHandle {
    /// Create a new DaoHandle with the given implementation
    pub fn new(address: Address, inner: Arc<dyn PermissionManager>) -> Self {
        Self { address, inner }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_granted(&self, where_: Address, who: Address, permission_id: B256, data: &[u8]) -> bool {
        self.inner.is_granted(where_, who, permission_id, data)
    }

    /// Fail with `Unauthorized` unless `who` holds `permission_id` on `where_`
    pub fn require(
        &self,
        where_: Address,
        who: Address,
        permission_id: B256,
        data: &[u8],
    ) -> Result<(), PluginError> {
        if self.is_granted(where_, who, permission_id, data) {
            Ok(())
        } else {
            Err(PluginError::Unauthorized {
                dao: self.address,
                where_,
                who,
                permission_id,
            })
        }
    }
}

impl fmt::Debug for DaoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaoHandle")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllowOnly(Address);

    impl PermissionManager for AllowOnly {
        fn is_granted(&self, _where: Address, who: Address, _id: B256, _data: &[u8]) -> bool {
            who == self.0
        }
    }

    #[test]
    fn test_require_reports_full_tuple() {
        let dao = Address::repeat_byte(0xda);
        let allowed = Address::repeat_byte(0x0a);
        let handle = DaoHandle::new(dao, Arc::new(AllowOnly(allowed)));

        let target = Address::repeat_byte(0x01);
        let stranger = Address::repeat_byte(0x0b);
        let id = B256::repeat_byte(0x5e);

        assert!(handle.require(target, allowed, id, &[]).is_ok());

        match handle.require(target, stranger, id, &[]) {
            Err(PluginError::Unauthorized {
                dao: d,
                where_,
                who,
                permission_id,
            }) => {
                assert_eq!(d, dao);
                assert_eq!(where_, target);
                assert_eq!(who, stranger);
                assert_eq!(permission_id, id);
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}
