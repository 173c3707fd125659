use thiserror::Error;

use super::model::AllocationEntity;
use crate::{kms::error::KmsError, util::address::AddressError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationStorageError {
    #[error("No capacity record with free indexes")]
    NoCapacity,
    #[error("Storage error: `{0}`")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("No free capacity for `{0}`")]
    NoCapacity(AllocationEntity),
    #[error("New list `{0}` has no allocations")]
    EmptyAllocations(u64),
    #[error("Invalid list size `{0}`")]
    InvalidListSize(u64),
    #[error("Storage error: `{0}`")]
    StorageError(AllocationStorageError),
    #[error("KMS error: `{0}`")]
    KmsError(#[from] KmsError),
    #[error("Address error: `{0}`")]
    AddressError(#[from] AddressError),
}
