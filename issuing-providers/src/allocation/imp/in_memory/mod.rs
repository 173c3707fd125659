use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::allocation::{
    error::AllocationStorageError,
    model::{AllocationListCapacity, AllocationListEntry, AllocationListKey},
    AllocationListStorage,
};


/// Capacity records held in process memory.
///
/// The mutex makes find-and-pop indivisible, which gives the same guarantee a
/// conditional update gives on a shared database, but only within one process.
#[derive(Clone, Default)]
pub struct InMemoryAllocationStorage {
    storage: Arc<Mutex<HashMap<AllocationListKey, Vec<AllocationListCapacity>>>>,
}

impl InMemoryAllocationStorage {
    pub fn new(records: Vec<AllocationListCapacity>) -> Self {
        let mut storage: HashMap<AllocationListKey, Vec<AllocationListCapacity>> = HashMap::new();
        for record in records {
            storage.entry(record.key.clone()).or_default().push(record);
        }

        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    pub async fn records(&self, key: &AllocationListKey) -> Vec<AllocationListCapacity> {
        let storage = self.storage.lock().await;
        storage.get(key).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl AllocationListStorage for InMemoryAllocationStorage {
    async fn pop_free_index(
        &self,
        key: &AllocationListKey,
    ) -> Result<AllocationListEntry, AllocationStorageError> {
        let mut storage = self.storage.lock().await;

        let record = storage
            .get_mut(key)
            .and_then(|records| {
                records
                    .iter_mut()
                    .rev()
                    .find(|record| !record.free_indexes.is_empty())
            })
            .ok_or(AllocationStorageError::NoCapacity)?;

        let index = record
            .free_indexes
            .pop()
            .ok_or(AllocationStorageError::NoCapacity)?;
        record.updated_at = OffsetDateTime::now_utc();

        Ok(AllocationListEntry {
            list_id: record.current_list_id,
            index,
            is_new_list: false,
        })
    }

    async fn insert(&self, capacity: AllocationListCapacity) -> Result<(), AllocationStorageError> {
        let mut storage = self.storage.lock().await;

        storage
            .entry(capacity.key.clone())
            .or_default()
            .push(capacity);

        Ok(())
    }
}
