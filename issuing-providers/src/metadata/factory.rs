use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::{error::MetadataError, MetadataLedger, MetadataLedgerProvider};
use crate::{
    common_models::{did::DidValue, issuer::Issuer},
    credential_builder::model::CredentialMetadata,
    kms::{model::SignJwtHeader, Kms},
};


#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub cao_did: DidValue,
    /// Encryption scheme of the entries, e.g. `cosekey:aes-256-gcm`.
    pub alg_type: String,
}

pub struct MetadataListFactory {
    ledger_provider: Arc<dyn MetadataLedgerProvider>,
    kms: Arc<dyn Kms>,
    params: Params,
}

impl MetadataListFactory {
    pub fn new(
        ledger_provider: Arc<dyn MetadataLedgerProvider>,
        kms: Arc<dyn Kms>,
        params: Params,
    ) -> Self {
        Self {
            ledger_provider,
            kms,
            params,
        }
    }

    /// Opens one ledger handle for `issuer`, shared by every call on the result.
    pub async fn connect(&self, issuer: &Issuer) -> Result<MetadataListHandle, MetadataError> {
        Ok(MetadataListHandle {
            ledger: self.ledger_provider.connect(issuer).await?,
            kms: self.kms.clone(),
            issuer: issuer.clone(),
            params: self.params.clone(),
        })
    }
}

pub struct MetadataListHandle {
    ledger: Arc<dyn MetadataLedger>,
    kms: Arc<dyn Kms>,
    issuer: Issuer,
    params: Params,
}

impl MetadataListHandle {
    /// Creates list `list_id` on the ledger. Only valid for lists the
    /// allocator has just opened.
    pub async fn create_list(&self, list_id: u64) -> Result<bool, MetadataError> {
        let attestation = self.sign_attestation(list_id).await?;

        let created = self
            .ledger
            .create_credential_metadata_list(
                &self.issuer.dlt_primary_address,
                list_id,
                &attestation,
                &self.params.cao_did,
                &self.params.alg_type,
            )
            .await?;

        tracing::info!(list_id, created, "metadata list provisioned");
        Ok(created)
    }

    pub async fn add_entry(&self, metadata: &CredentialMetadata) -> Result<bool, MetadataError> {
        let added = self
            .ledger
            .add_credential_metadata_entry(
                metadata,
                &metadata.content_hash,
                &self.params.cao_did,
                &self.params.alg_type,
            )
            .await?;

        tracing::debug!(
            list_id = metadata.entry.list_id,
            index = metadata.entry.index,
            "metadata entry anchored"
        );
        Ok(added)
    }

    async fn sign_attestation(&self, list_id: u64) -> Result<String, MetadataError> {
        let issuer_did = self.issuer.did.as_str();
        let payload = json!({
            "vc": {
                "type": ["VerifiableCredential", "CredentialMetadataListHeader"],
                "issuer": issuer_did,
                "credentialSubject": {
                    "listId": list_id,
                    "accountId": self.issuer.dlt_primary_address,
                },
            },
        });

        let header = SignJwtHeader {
            key_id: Some(format!(
                "{issuer_did}#{}",
                self.issuer.issuing_service_did_key_id
            )),
        };

        Ok(self
            .kms
            .sign_jwt(payload, &self.issuer.issuing_service_key_id, header)
            .await?)
    }
}
