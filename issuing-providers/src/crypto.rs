//! Re-export of the crypto primitives used across providers.

pub use issuing_crypto::*;
