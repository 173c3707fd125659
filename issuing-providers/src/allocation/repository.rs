//! Storage adapter turning issuer-level requests into capacity record operations.

use std::sync::Arc;

use time::OffsetDateTime;

use super::{
    error::{AllocationError, AllocationStorageError},
    model::{AllocationEntity, AllocationListCapacity, AllocationListEntry, AllocationListKey},
    AllocationListStorage,
};
use crate::{common_models::issuer::Issuer, kms::Kms, util::address::address_from_private_key};


pub struct AllocationListRepository {
    storage: Arc<dyn AllocationListStorage>,
    kms: Arc<dyn Kms>,
}

impl AllocationListRepository {
    pub fn new(storage: Arc<dyn AllocationListStorage>, kms: Arc<dyn Kms>) -> Self {
        Self { storage, kms }
    }

    /// Pops the next free slot of the current list.
    ///
    /// Fails with [`AllocationError::NoCapacity`] when the pool is exhausted or
    /// was never created; genuine storage faults surface as
    /// [`AllocationError::StorageError`].
    pub async fn allocate_next_entry(
        &self,
        entity: AllocationEntity,
        issuer: &Issuer,
    ) -> Result<AllocationListEntry, AllocationError> {
        let key = self.key(entity, issuer).await?;

        self.storage
            .pop_free_index(&key)
            .await
            .map_err(|err| match err {
                AllocationStorageError::NoCapacity => AllocationError::NoCapacity(entity),
                err => AllocationError::StorageError(err),
            })
    }

    /// Stores a new capacity record for `new_list_id`. The first allocation is
    /// returned as already consumed, the rest become the free stack.
    pub async fn create_new_allocation_list(
        &self,
        entity: AllocationEntity,
        issuer: &Issuer,
        new_list_id: u64,
        allocations: Vec<u64>,
    ) -> Result<AllocationListEntry, AllocationError> {
        let mut allocations = allocations.into_iter();
        let index = allocations
            .next()
            .ok_or(AllocationError::EmptyAllocations(new_list_id))?;

        let now = OffsetDateTime::now_utc();
        let capacity = AllocationListCapacity {
            key: self.key(entity, issuer).await?,
            current_list_id: new_list_id,
            free_indexes: allocations.collect(),
            created_at: now,
            updated_at: now,
        };

        self.storage
            .insert(capacity)
            .await
            .map_err(AllocationError::StorageError)?;

        Ok(AllocationListEntry {
            list_id: new_list_id,
            index,
            is_new_list: true,
        })
    }

    /// Resolved on every call; operator keys can rotate.
    pub async fn operator_address(&self, issuer: &Issuer) -> Result<String, AllocationError> {
        if let Some(address) = &issuer.dlt_operator_address {
            return Ok(address.to_owned());
        }

        let exported = self
            .kms
            .export_key_or_secret(&issuer.dlt_operator_key_id)
            .await?;

        Ok(address_from_private_key(&exported.private_key)?)
    }

    async fn key(
        &self,
        entity: AllocationEntity,
        issuer: &Issuer,
    ) -> Result<AllocationListKey, AllocationError> {
        Ok(AllocationListKey {
            tenant_id: issuer.tenant_id.clone(),
            operator_address: self.operator_address(issuer).await?,
            entity_name: entity,
        })
    }
}
