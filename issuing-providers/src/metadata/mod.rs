//! Credential metadata registry seam.
//!
//! A metadata list is created once per list id with an attestation VC signed
//! by the issuer, then receives one entry per issued credential.

use std::sync::Arc;

use crate::{
    common_models::{did::DidValue, issuer::Issuer},
    credential_builder::model::CredentialMetadata,
    ledger::LedgerError,
};

pub mod error;
pub mod factory;

/// Metadata registry client bound to one issuer.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataLedger: Send + Sync {
    async fn create_credential_metadata_list(
        &self,
        account_id: &str,
        list_id: u64,
        attestation_jwt: &str,
        cao_did: &DidValue,
        alg_type: &str,
    ) -> Result<bool, LedgerError>;

    async fn add_credential_metadata_entry(
        &self,
        metadata: &CredentialMetadata,
        content_hash: &str,
        cao_did: &DidValue,
        alg_type: &str,
    ) -> Result<bool, LedgerError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataLedgerProvider: Send + Sync {
    async fn connect(&self, issuer: &Issuer) -> Result<Arc<dyn MetadataLedger>, LedgerError>;
}
