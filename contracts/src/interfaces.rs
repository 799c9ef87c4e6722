//! Solidity ABI of the condition and the framework interfaces it implements
//!
//! ERC-165 interface ids are derived from these declarations rather than
//! hard-coded, so a signature change here moves the ids with it.

use alloy_primitives::FixedBytes;
use alloy_sol_types::{sol, SolCall};

sol! {
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    interface IPlugin {
        function pluginType() external view returns (uint8);
    }

    interface IProtocolVersion {
        function protocolVersion() external view returns (uint8[3]);
    }

    interface IPermissionCondition {
        function isGranted(address _where, address _who, bytes32 _permissionId, bytes calldata _data)
            external
            view
            returns (bool isPermitted);
    }

    interface IValidHashCondition {
        event HashValidated(bytes32 hash);
        event HashInvalidated(bytes32 hash);

        function dao() external view returns (address);
        function validateHash(bytes32 _hash) external;
        function invalidateHash(bytes32 _hash) external;
        function isValid(bytes32 _hash) external view returns (bool);
    }
}

/// ERC-165 id: the XOR of every function selector in the interface
pub fn interface_id(selectors: &[[u8; 4]]) -> FixedBytes<4> {
    let mut id = [0u8; 4];
    for selector in selectors {
        for (byte, s) in id.iter_mut().zip(selector) {
            *byte ^= s;
        }
    }
    FixedBytes(id)
}

pub fn ierc165_id() -> FixedBytes<4> {
    interface_id(&[IERC165::supportsInterfaceCall::SELECTOR])
}

pub fn iplugin_id() -> FixedBytes<4> {
    interface_id(&[IPlugin::pluginTypeCall::SELECTOR])
}

pub fn iprotocol_version_id() -> FixedBytes<4> {
    interface_id(&[IProtocolVersion::protocolVersionCall::SELECTOR])
}

pub fn ipermission_condition_id() -> FixedBytes<4> {
    interface_id(&[IPermissionCondition::isGrantedCall::SELECTOR])
}

/// Ids the condition reports through `supportsInterface`
pub fn supported_interface_ids() -> [FixedBytes<4>; 4] {
    [
        ierc165_id(),
        iplugin_id(),
        iprotocol_version_id(),
        ipermission_condition_id(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erc165_id_is_standard() {
        assert_eq!(ierc165_id(), FixedBytes([0x01, 0xff, 0xc9, 0xa7]));
    }

    #[test]
    fn test_interface_id_xors_selectors() {
        let id = interface_id(&[[0xff, 0x00, 0x0f, 0x01], [0x0f, 0x00, 0xff, 0x01]]);
        assert_eq!(id, FixedBytes([0xf0, 0x00, 0xf0, 0x00]));
        assert_eq!(interface_id(&[]), FixedBytes([0u8; 4]));
    }

    #[test]
    fn test_supported_ids_are_distinct() {
        let ids = supported_interface_ids();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
