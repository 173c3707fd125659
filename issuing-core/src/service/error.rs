use issuing_providers::{
    allocation::error::AllocationError, credential_builder::error::BuilderError,
    metadata::error::MetadataError, revocation::error::RevocationError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssuingServiceError {
    #[error("Allocation error: `{0}`")]
    AllocationError(#[from] AllocationError),
    #[error("Builder error: `{0}`")]
    BuilderError(#[from] BuilderError),
    #[error("Revocation error: `{0}`")]
    RevocationError(#[from] RevocationError),
    #[error("Metadata error: `{0}`")]
    MetadataError(#[from] MetadataError),
}
