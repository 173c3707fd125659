//! Key algorithm provider.

use std::sync::Arc;

use super::{error::KeyAlgorithmProviderError, KeyAlgorithm};
use crate::crypto::Signer;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyAlgorithmProvider: Send + Sync {
    fn get_key_algorithm(&self, algorithm: &str) -> Option<Arc<dyn KeyAlgorithm>>;

    fn get_signer(&self, algorithm: &str) -> Result<Arc<dyn Signer>, KeyAlgorithmProviderError>;
}
