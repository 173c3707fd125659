use issuing_providers::{
    allocation::allocator::Params as AllocatorParams,
    credential_builder::Params as BuilderParams, metadata::factory::Params as MetadataParams,
};
use serde::Deserialize;

use crate::model::KeyAlgorithmType;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssuingConfig {
    pub revocation_list_size: u64,
    pub metadata_list_size: u64,
    /// First index of a freshly created list.
    pub allocation_index_origin: u64,
    pub revocation_contract_address: String,
    /// Passed through to metadata ledger clients.
    pub metadata_contract_address: String,
    pub credential_extensions_context_url: Option<String>,
    pub credential_subject_context: bool,
    pub refresh_service_url: Option<String>,
    pub cao_did: String,
    pub metadata_alg_type: String,
    pub default_signature_algorithm: String,
}

impl Default for IssuingConfig {
    fn default() -> Self {
        Self {
            revocation_list_size: 10240,
            metadata_list_size: 10000,
            allocation_index_origin: 1,
            revocation_contract_address: String::new(),
            metadata_contract_address: String::new(),
            credential_extensions_context_url: None,
            credential_subject_context: false,
            refresh_service_url: None,
            cao_did: String::new(),
            metadata_alg_type: "cosekey:aes-256-gcm".to_string(),
            default_signature_algorithm: KeyAlgorithmType::Secp256k1.to_string(),
        }
    }
}

impl IssuingConfig {
    pub fn allocator_params(&self) -> AllocatorParams {
        AllocatorParams {
            index_origin: self.allocation_index_origin,
        }
    }

    pub fn builder_params(&self) -> BuilderParams {
        BuilderParams {
            revocation_contract_address: self.revocation_contract_address.to_owned(),
            credential_extensions_context_url: self.credential_extensions_context_url.to_owned(),
            credential_subject_context: self.credential_subject_context,
            refresh_service_url: self.refresh_service_url.to_owned(),
            default_signature_algorithm: self.default_signature_algorithm.to_owned(),
        }
    }

    pub fn metadata_params(&self) -> MetadataParams {
        MetadataParams {
            cao_did: self.cao_did.to_owned().into(),
            alg_type: self.metadata_alg_type.to_owned(),
        }
    }
}
