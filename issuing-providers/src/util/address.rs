//! Ledger account addresses.

use ethers_core::{
    k256::ecdsa::SigningKey,
    utils::{secret_key_to_address, to_checksum},
};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid secp256k1 private key")]
    InvalidPrivateKey,
}

/// Derives the EIP-55 checksummed account address of a secp256k1 private key.
pub fn address_from_private_key(private_key: &[u8]) -> Result<String, AddressError> {
    let signing_key =
        SigningKey::from_slice(private_key).map_err(|_| AddressError::InvalidPrivateKey)?;

    Ok(to_checksum(&secret_key_to_address(&signing_key), None))
}
