//! Key-management service seam.
//!
//! Long-term issuer keys are referenced by [`KeyId`] only. The pipeline asks the
//! KMS for two things: exporting the operator key (to derive its ledger address)
//! and signing list attestation JWTs with the issuing service key.

use crate::common_models::key::KeyId;

pub mod error;
pub mod imp;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait Kms: Send + Sync {
    async fn export_key_or_secret(
        &self,
        key_id: &KeyId,
    ) -> Result<model::ExportedKey, error::KmsError>;

    /// Signs `payload` as a compact JWT. The algorithm follows the stored key type.
    async fn sign_jwt(
        &self,
        payload: serde_json::Value,
        key_id: &KeyId,
        header: model::SignJwtHeader,
    ) -> Result<String, error::KmsError>;
}
