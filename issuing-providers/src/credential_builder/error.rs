//! Enumerates errors related to credential building.

use thiserror::Error;

use crate::{
    crypto::{CryptoProviderError, HasherError},
    jwt::error::JwtError,
    key_algorithm::error::{KeyAlgorithmError, KeyAlgorithmProviderError},
};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum FormatterError {
    #[error("Could not format: `{0}`")]
    CouldNotFormat(String),
    #[error("Invalid URL: `{0}`")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Offer does not declare a credential type")]
    MissingCredentialType,
    #[error("Unknown credential type `{0}`")]
    UnknownCredentialType(String),
    #[error("Missing key algorithm `{0}`")]
    MissingKeyAlgorithm(String),
    #[error("Expected {expected} allocation entries, got {actual}")]
    EntryCountMismatch { expected: usize, actual: usize },
    #[error("Formatter error: `{0}`")]
    FormatterError(#[from] FormatterError),
    #[error("Hasher error: `{0}`")]
    HasherError(#[from] HasherError),
    #[error("Crypto provider error: `{0}`")]
    CryptoProviderError(#[from] CryptoProviderError),
    #[error("Key algorithm error: `{0}`")]
    KeyAlgorithmError(#[from] KeyAlgorithmError),
    #[error("Key algorithm provider error: `{0}`")]
    KeyAlgorithmProviderError(#[from] KeyAlgorithmProviderError),
    #[error("JWT error: `{0}`")]
    JwtError(#[from] JwtError),
}
