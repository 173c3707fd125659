use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, OneOrMany};
use time::OffsetDateTime;

use crate::{allocation::model::AllocationListEntry, key_algorithm::model::PublicKeyJwk};

/// Raw credential content supplied by the caller. Never mutated.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityOffer {
    #[serde(rename = "@context", default, skip_serializing_if = "Vec::is_empty")]
    #[serde_as(as = "OneOrMany<_>")]
    pub context: Vec<String>,
    #[serde_as(as = "OneOrMany<_>")]
    pub r#type: Vec<String>,
    #[serde(default)]
    pub credential_subject: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde_as(as = "OneOrMany<_>")]
    pub credential_status: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde_as(as = "OneOrMany<_>")]
    pub refresh_service: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_schema: Option<Value>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<OffsetDateTime>,
    /// Everything else the offer carries, bookkeeping fields included.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl VelocityOffer {
    /// First declared type other than `VerifiableCredential`.
    pub fn credential_type(&self) -> Option<&str> {
        self.r#type
            .iter()
            .map(String::as_str)
            .find(|r#type| *r#type != "VerifiableCredential")
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialTypeMetadata {
    pub schema_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde_as(as = "OneOrMany<_>")]
    pub json_ld_context: Vec<String>,
    #[serde(default)]
    pub layer1: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_signature_algorithm: Option<String>,
}

pub type CredentialTypesMap = HashMap<String, CredentialTypeMetadata>;

/// Ledger record anchoring one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialMetadata {
    #[serde(flatten)]
    pub entry: AllocationListEntry,
    pub credential_type: String,
    pub credential_type_encoded: String,
    pub content_hash: String,
    pub public_key: PublicKeyJwk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltCredential {
    pub metadata: CredentialMetadata,
    pub json_ld_credential: Value,
    pub vc_jwt: String,
}

/// Custom claims of a VC-JWT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcClaims {
    pub vc: Value,
}
