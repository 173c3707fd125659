use serde::{Deserialize, Serialize};

use super::{
    did::DidValue,
    key::KeyId,
    macros::{impl_display, impl_from, impl_into},
};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);
impl_display!(TenantId);
impl_from!(TenantId; String);
impl_into!(TenantId; String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identity under which credentials are issued.
///
/// Owned by the caller and read-only for the duration of an issuance call.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    pub tenant_id: TenantId,
    pub did: DidValue,
    pub dlt_primary_address: String,
    /// When absent the operator address is derived from `dlt_operator_key_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlt_operator_address: Option<String>,
    pub dlt_operator_key_id: KeyId,
    pub issuing_service_key_id: KeyId,
    /// Fragment of the issuer DID document key used by the issuing service, e.g. `key-2`.
    pub issuing_service_did_key_id: String,
}
