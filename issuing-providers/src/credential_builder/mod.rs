//! Turns offers and allocated slots into signed VC-JWTs.
//!
//! Each credential gets its own freshly generated key pair. The public key is
//! written to the ledger with the credential metadata entry, and the private
//! key is dropped once the JWT is signed. The builder performs no ledger
//! writes; anchoring happens afterwards.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::Deserialize;
use time::OffsetDateTime;

use self::{
    content_hash::{content_hash, encode_credential_type},
    error::BuilderError,
    json_ld::{assemble_credential, ContextOptions, CredentialContent},
    model::{BuiltCredential, CredentialMetadata, CredentialTypesMap, VcClaims, VelocityOffer},
};
use crate::{
    allocation::model::AllocationListEntry,
    common_models::issuer::Issuer,
    crypto::CryptoProvider,
    jwt::{model::JWTPayload, Jwt},
    key_algorithm::{
        imp::signature_provider::KeyPairSignatureProvider, provider::KeyAlgorithmProvider,
    },
};

pub mod content_hash;
pub mod error;
pub mod json_ld;
pub mod model;

#[cfg(test)]
mod test;

pub const SHA256_HASHER: &str = "sha-256";
pub const KECCAK256_HASHER: &str = "keccak-256";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub revocation_contract_address: String,
    #[serde(default)]
    pub credential_extensions_context_url: Option<String>,
    /// Repeat the full context array inside `credentialSubject`.
    #[serde(default)]
    pub credential_subject_context: bool,
    #[serde(default)]
    pub refresh_service_url: Option<String>,
    pub default_signature_algorithm: String,
}

pub struct CredentialBuilder {
    crypto: Arc<dyn CryptoProvider>,
    key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    params: Params,
}

impl CredentialBuilder {
    pub fn new(
        crypto: Arc<dyn CryptoProvider>,
        key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
        params: Params,
    ) -> Self {
        Self {
            crypto,
            key_algorithm_provider,
            params,
        }
    }

    /// Builds one credential per offer, concurrently. The result keeps the
    /// order of `offers`; entries are matched to offers by position.
    #[allow(clippy::too_many_arguments)]
    pub async fn build_verifiable_credentials(
        &self,
        offers: &[VelocityOffer],
        credential_subject_id: Option<&str>,
        issuer: &Issuer,
        metadata_entries: &[AllocationListEntry],
        revocation_list_entries: &[AllocationListEntry],
        credential_types: &CredentialTypesMap,
        operator_address: &str,
    ) -> Result<Vec<BuiltCredential>, BuilderError> {
        for entries in [metadata_entries, revocation_list_entries] {
            if entries.len() != offers.len() {
                return Err(BuilderError::EntryCountMismatch {
                    expected: offers.len(),
                    actual: entries.len(),
                });
            }
        }

        try_join_all(
            offers
                .iter()
                .zip(metadata_entries)
                .zip(revocation_list_entries)
                .map(|((offer, metadata_entry), revocation_entry)| {
                    self.build_verifiable_credential(
                        offer,
                        credential_subject_id,
                        issuer,
                        *metadata_entry,
                        revocation_entry,
                        credential_types,
                        operator_address,
                    )
                }),
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn build_verifiable_credential(
        &self,
        offer: &VelocityOffer,
        credential_subject_id: Option<&str>,
        issuer: &Issuer,
        metadata_entry: AllocationListEntry,
        revocation_entry: &AllocationListEntry,
        credential_types: &CredentialTypesMap,
        operator_address: &str,
    ) -> Result<BuiltCredential, BuilderError> {
        let credential_type = offer
            .credential_type()
            .ok_or(BuilderError::MissingCredentialType)?;
        let type_metadata = credential_types
            .get(credential_type)
            .ok_or_else(|| BuilderError::UnknownCredentialType(credential_type.to_owned()))?;

        let algorithm = type_metadata
            .default_signature_algorithm
            .as_deref()
            .unwrap_or(&self.params.default_signature_algorithm);
        let key_algorithm = self
            .key_algorithm_provider
            .get_key_algorithm(algorithm)
            .ok_or_else(|| BuilderError::MissingKeyAlgorithm(algorithm.to_owned()))?;
        let key_pair = key_algorithm.generate_key_pair();

        let sha256 = self.crypto.get_hasher(SHA256_HASHER)?;
        let keccak256 = self.crypto.get_hasher(KECCAK256_HASHER)?;
        let content_hash = content_hash(offer, sha256.as_ref())?;

        let metadata = CredentialMetadata {
            entry: metadata_entry,
            credential_type: credential_type.to_owned(),
            credential_type_encoded: encode_credential_type(credential_type, keccak256.as_ref())?,
            content_hash,
            public_key: key_algorithm.bytes_to_jwk(&key_pair.public)?,
        };

        let credential_id = credential_id(&issuer.dlt_primary_address, &metadata_entry);
        let refresh_service = self
            .params
            .refresh_service_url
            .as_deref()
            .map(|url| json_ld::refresh_service(url, &credential_id))
            .transpose()?;

        let issued_at = OffsetDateTime::now_utc();
        let json_ld_credential = assemble_credential(
            CredentialContent {
                offer,
                type_metadata,
                credential_id: &credential_id,
                issuer_did: issuer.did.as_str(),
                credential_subject_id,
                content_hash: &metadata.content_hash,
                revocation_status: json_ld::revocation_status(
                    &self.params.revocation_contract_address,
                    operator_address,
                    revocation_entry,
                )?,
                refresh_service,
                issued_at,
            },
            &ContextOptions {
                extensions_context_url: self.params.credential_extensions_context_url.as_deref(),
                embed_subject_context: self.params.credential_subject_context,
            },
        )?;

        let payload = JWTPayload {
            issued_at: Some(issued_at),
            expires_at: offer.valid_until,
            invalid_before: Some(offer.valid_from.unwrap_or(issued_at)),
            issuer: Some(issuer.did.to_string()),
            subject: credential_subject_id.map(ToOwned::to_owned),
            jwt_id: Some(credential_id.to_owned()),
            custom: VcClaims {
                vc: json_ld_credential.clone(),
            },
        };

        let auth_fn = KeyPairSignatureProvider {
            signer: self.key_algorithm_provider.get_signer(algorithm)?,
            public_key: key_pair.public,
            private_key: key_pair.private,
            key_id: Some(format!("{credential_id}#key-1")),
        };

        let jwt = Jwt::new(
            "JWT".to_owned(),
            key_algorithm.get_signer_algorithm_id(),
            auth_fn.key_id.clone(),
            payload,
        );
        let vc_jwt = jwt.tokenize(Box::new(auth_fn)).await?;

        tracing::debug!(
            credential_type,
            list_id = metadata_entry.list_id,
            index = metadata_entry.index,
            "built verifiable credential"
        );

        Ok(BuiltCredential {
            metadata,
            json_ld_credential,
            vc_jwt,
        })
    }
}

/// `did:velocity:v2:<address>:<listId>:<index>`, addressing the metadata slot.
pub fn credential_id(primary_address: &str, metadata_entry: &AllocationListEntry) -> String {
    format!(
        "did:velocity:v2:{}:{}:{}",
        primary_address.to_lowercase(),
        metadata_entry.list_id,
        metadata_entry.index
    )
}
