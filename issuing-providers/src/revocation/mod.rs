//! Revocation registry seam and list provisioning.
//!
//! Every credential points at a slot of an on-ledger revocation list through
//! its `credentialStatus`. A list must be registered for the operating party
//! before any of its slots is handed out to a verifier.

use std::sync::Arc;

use crate::{
    common_models::{did::DidValue, issuer::Issuer},
    ledger::LedgerError,
};

pub mod error;
pub mod provisioner;

/// Revocation registry client bound to one issuer's operator wallet.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Registers `list_id` on behalf of `cao_did`.
    ///
    /// Fails with [`LedgerError::WalletNotInRegistry`] when the operator wallet
    /// has not been added to the registry yet.
    async fn add_revocation_list_signed(
        &self,
        list_id: u64,
        cao_did: &DidValue,
    ) -> Result<(), LedgerError>;

    async fn add_wallet_to_registry_signed(&self, cao_did: &DidValue) -> Result<(), LedgerError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait RevocationLedgerProvider: Send + Sync {
    async fn connect(&self, issuer: &Issuer) -> Result<Arc<dyn RevocationLedger>, LedgerError>;
}
