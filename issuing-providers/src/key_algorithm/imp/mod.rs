//! Implementations of key algorithms.

pub mod provider;
pub mod signature_provider;

pub mod es256;
pub mod secp256k1;

mod jwk;
