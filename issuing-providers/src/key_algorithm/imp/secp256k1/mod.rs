use zeroize::Zeroizing;

use super::jwk::{jwk_to_uncompressed, uncompressed_to_jwk};
use crate::{
    crypto::imp::signer::es256k::ES256KSigner,
    key_algorithm::{
        error::KeyAlgorithmError,
        model::{GeneratedKey, PublicKeyJwk},
        KeyAlgorithm,
    },
};


/// secp256k1 keys, signing as `ES256K`. Default for credentials.
pub struct Secp256k1;

impl KeyAlgorithm for Secp256k1 {
    fn get_signer_algorithm_id(&self) -> String {
        "ES256K".to_string()
    }

    fn generate_key_pair(&self) -> GeneratedKey {
        let (private, public) = ES256KSigner::random();

        GeneratedKey {
            public,
            private: Zeroizing::new(private),
        }
    }

    fn public_key_from_private(&self, private_key: &[u8]) -> Result<Vec<u8>, KeyAlgorithmError> {
        Ok(ES256KSigner::public_from_private(private_key)?)
    }

    fn bytes_to_jwk(&self, bytes: &[u8]) -> Result<PublicKeyJwk, KeyAlgorithmError> {
        uncompressed_to_jwk("secp256k1", &ES256KSigner::to_uncompressed(bytes)?)
    }

    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError> {
        jwk_to_uncompressed("secp256k1", jwk)
    }
}
