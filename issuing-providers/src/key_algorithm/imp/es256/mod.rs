use zeroize::Zeroizing;

use super::jwk::{jwk_to_uncompressed, uncompressed_to_jwk};
use crate::{
    crypto::imp::signer::es256::ES256Signer,
    key_algorithm::{
        error::KeyAlgorithmError,
        model::{GeneratedKey, PublicKeyJwk},
        KeyAlgorithm,
    },
};

pub struct Es256;

impl KeyAlgorithm for Es256 {
    fn get_signer_algorithm_id(&self) -> String {
        "ES256".to_string()
    }

    fn generate_key_pair(&self) -> GeneratedKey {
        let (private, public) = ES256Signer::random();

        GeneratedKey {
            public,
            private: Zeroizing::new(private),
        }
    }

    fn public_key_from_private(&self, private_key: &[u8]) -> Result<Vec<u8>, KeyAlgorithmError> {
        Ok(ES256Signer::public_from_private(private_key)?)
    }

    fn bytes_to_jwk(&self, bytes: &[u8]) -> Result<PublicKeyJwk, KeyAlgorithmError> {
        uncompressed_to_jwk("P-256", &ES256Signer::to_uncompressed(bytes)?)
    }

    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError> {
        jwk_to_uncompressed("P-256", jwk)
    }
}
