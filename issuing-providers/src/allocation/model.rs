use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::common_models::issuer::TenantId;

/// Capacity pool an entry is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AllocationEntity {
    #[strum(serialize = "revocationListAllocations")]
    #[serde(rename = "revocationListAllocations")]
    RevocationList,
    #[strum(serialize = "metadataListAllocations")]
    #[serde(rename = "metadataListAllocations")]
    MetadataList,
}

/// Slot handed out by a single allocation. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationListEntry {
    pub list_id: u64,
    pub index: u64,
    /// The ledger does not know `list_id` yet and it must be provisioned
    /// before any entry in it is anchored.
    pub is_new_list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationListKey {
    pub tenant_id: TenantId,
    pub operator_address: String,
    pub entity_name: AllocationEntity,
}

/// Persisted capacity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationListCapacity {
    #[serde(flatten)]
    pub key: AllocationListKey,
    pub current_list_id: u64,
    /// Used as a stack, popped from the end.
    pub free_indexes: Vec<u64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
