//! Key algorithms for the single-use credential keys.
//!
//! Every issued credential is signed with a fresh key pair generated here. The
//! public half travels to the ledger as a JWK inside the credential metadata
//! entry, so verifiers only need ledger data to check a VC-JWT signature.

use error::KeyAlgorithmError;
use model::{GeneratedKey, PublicKeyJwk};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithm: Send + Sync {
    /// Crypto signer id, also used as the JOSE `alg` header value.
    fn get_signer_algorithm_id(&self) -> String;

    /// Generates a new in-memory key pair. The public key is SEC1 compressed.
    fn generate_key_pair(&self) -> GeneratedKey;

    /// Derives the compressed public key of a private scalar.
    fn public_key_from_private(&self, private_key: &[u8]) -> Result<Vec<u8>, KeyAlgorithmError>;

    /// Converts public key bytes to JWK.
    fn bytes_to_jwk(&self, bytes: &[u8]) -> Result<PublicKeyJwk, KeyAlgorithmError>;

    /// Converts a JWK back to uncompressed SEC1 bytes.
    fn jwk_to_bytes(&self, jwk: &PublicKeyJwk) -> Result<Vec<u8>, KeyAlgorithmError>;
}
