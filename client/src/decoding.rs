//! Calldata decoders

use alloy_primitives::{B256, U256};
use alloy_sol_types::SolCall;

use contracts::interfaces::IValidHashCondition;
use sdk::{PluginError, Result};

use crate::abi::IStorage;

/// Recover the value from `storeNumber(uint256)` calldata
///
/// Input must be exactly the 4-byte selector followed by one 32-byte word.
pub fn decode_store_number(data: &[u8]) -> Result<U256> {
    decode_call::<IStorage::storeNumberCall>(data).map(|call| call._number)
}

fn decode_call<C: SolCall>(data: &[u8]) -> Result<C> {
    if data.len() != 36 {
        return Err(PluginError::MalformedInput(format!(
            "{} calldata must be 36 bytes, got {}",
            C::SIGNATURE,
            data.len()
        )));
    }
    if data[..4] != C::SELECTOR {
        return Err(PluginError::MalformedInput(format!(
            "Selector 0x{} does not match {}",
            hex::encode(&data[..4]),
            C::SIGNATURE
        )));
    }
    C::abi_decode(data, true).map_err(|e| PluginError::MalformedInput(e.to_string()))
}

/// Decoders for the actions produced by [`crate::Encoding`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoding;

impl Decoding {
    pub fn store_number_action(&self, data: &[u8]) -> Result<U256> {
        decode_store_number(data)
    }

    pub fn validate_hash_action(&self, data: &[u8]) -> Result<B256> {
        decode_call::<IValidHashCondition::validateHashCall>(data).map(|call| call._hash)
    }

    pub fn invalidate_hash_action(&self, data: &[u8]) -> Result<B256> {
        decode_call::<IValidHashCondition::invalidateHashCall>(data).map(|call| call._hash)
    }
}
