//! Enumerates errors related to the KMS.

use thiserror::Error;

use crate::{
    common_models::key::KeyId,
    jwt::error::JwtError,
    key_algorithm::error::{KeyAlgorithmError, KeyAlgorithmProviderError},
};

#[derive(Debug, Error)]
pub enum KmsError {
    #[error("Key not found: `{0}`")]
    KeyNotFound(KeyId),
    #[error("Invalid key algorithm `{0}`")]
    InvalidKeyAlgorithm(String),
    #[error("Key algorithm error: `{0}`")]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
    #[error("Key algorithm provider error: `{0}`")]
    KeyAlgorithmProviderError(#[from] KeyAlgorithmProviderError),
    #[error("JWT error: `{0}`")]
    JwtError(#[from] JwtError),
    #[error("Transport error: `{0}`")]
    Transport(anyhow::Error),
}
