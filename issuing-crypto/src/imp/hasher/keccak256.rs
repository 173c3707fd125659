use ct_codecs::{Encoder, Hex};
use ethers_core::utils::keccak256;

use crate::{Hasher, HasherError};

/// Keccak-256 as used by the ledger for addresses and compact type ids.
pub struct Keccak256 {}

impl Hasher for Keccak256 {
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError> {
        Hex::encode_to_string(keccak256(input)).map_err(|_| HasherError::CouldNotHash)
    }

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(keccak256(input).to_vec())
    }
}
