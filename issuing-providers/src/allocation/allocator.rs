//! Turns "give me N slots" into N allocation entries, rolling over to a new
//! list when the current one is exhausted.

use std::sync::Arc;

use serde::Deserialize;

use super::{
    error::AllocationError,
    model::{AllocationEntity, AllocationListEntry},
    repository::AllocationListRepository,
};
use crate::{common_models::issuer::Issuer, crypto::imp::utilities::generate_list_id};


#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// First index of a freshly created list.
    pub index_origin: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self { index_origin: 1 }
    }
}

pub struct ListAllocator {
    repository: Arc<AllocationListRepository>,
    params: Params,
}

impl ListAllocator {
    pub fn new(repository: Arc<AllocationListRepository>, params: Params) -> Self {
        Self { repository, params }
    }

    pub async fn allocate_list_entry(
        &self,
        issuer: &Issuer,
        entity: AllocationEntity,
        list_size: u64,
    ) -> Result<AllocationListEntry, AllocationError> {
        if list_size == 0 {
            return Err(AllocationError::InvalidListSize(list_size));
        }

        match self.repository.allocate_next_entry(entity, issuer).await {
            Ok(entry) => {
                tracing::debug!(
                    %entity,
                    list_id = entry.list_id,
                    index = entry.index,
                    "allocated list entry"
                );
                Ok(entry)
            }
            Err(AllocationError::NoCapacity(_)) => {
                let new_list_id = generate_list_id();
                let allocations = new_list_allocations(self.params.index_origin, list_size);

                let entry = self
                    .repository
                    .create_new_allocation_list(entity, issuer, new_list_id, allocations)
                    .await?;

                tracing::info!(
                    %entity,
                    tenant_id = %issuer.tenant_id,
                    list_id = entry.list_id,
                    list_size,
                    "created allocation list"
                );
                Ok(entry)
            }
            Err(err) => Err(err),
        }
    }

    /// Allocates `total` entries one after another.
    ///
    /// Sequential on purpose: exhaustion discovered midway through the batch
    /// must create exactly one replacement list.
    pub async fn allocate_list_entries(
        &self,
        total: usize,
        issuer: &Issuer,
        entity: AllocationEntity,
        list_size: u64,
    ) -> Result<Vec<AllocationListEntry>, AllocationError> {
        let mut entries = Vec::with_capacity(total);
        for _ in 0..total {
            entries.push(self.allocate_list_entry(issuer, entity, list_size).await?);
        }
        Ok(entries)
    }
}

/// Index layout of a new list: `origin` first, then the remaining indexes in
/// descending order so that popping the free stack yields `origin + 1`,
/// `origin + 2`, and so on.
pub fn new_list_allocations(origin: u64, list_size: u64) -> Vec<u64> {
    std::iter::once(origin)
        .chain((origin + 1..origin + list_size).rev())
        .collect()
}
