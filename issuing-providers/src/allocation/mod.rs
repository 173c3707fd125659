//! Collision-free allocation of ledger list slots.
//!
//! Each `(tenant, operator address, entity)` owns a capacity record holding
//! the current list id and a stack of free indexes. Indexes are only ever
//! consumed through [`AllocationListStorage::pop_free_index`], which must be a
//! single atomic operation in the backing store; there is no in-process lock.
//!
//! When a record is exhausted a new list is created. Two independent callers
//! observing exhaustion at the same time may both create a list; the capacity
//! of the losing list is wasted, which is accepted.

use model::{AllocationListCapacity, AllocationListEntry, AllocationListKey};

pub mod allocator;
pub mod error;
pub mod imp;
pub mod model;
pub mod repository;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait AllocationListStorage: Send + Sync {
    /// Finds the record for `key` with a non-empty free list, pops its last
    /// index and bumps `updated_at`, all in one indivisible step.
    ///
    /// Fails with [`error::AllocationStorageError::NoCapacity`] when no such
    /// record exists.
    async fn pop_free_index(
        &self,
        key: &AllocationListKey,
    ) -> Result<AllocationListEntry, error::AllocationStorageError>;

    async fn insert(
        &self,
        capacity: AllocationListCapacity,
    ) -> Result<(), error::AllocationStorageError>;
}
