//! Two-phase credential issuance.
//!
//! [`IssuingService::prepare`] allocates ledger slots and builds signed
//! credentials without touching the ledger. [`IssuingService::anchor`] then
//! provisions new lists and writes metadata entries. A failed anchor leaves
//! already written entries in place.

use std::sync::Arc;

use futures::future::try_join_all;
use itertools::Itertools;
use issuing_providers::{
    allocation::{
        allocator::ListAllocator,
        model::{AllocationEntity, AllocationListEntry},
        repository::AllocationListRepository,
    },
    common_models::issuer::Issuer,
    credential_builder::{
        model::{BuiltCredential, CredentialTypesMap, VelocityOffer},
        CredentialBuilder,
    },
    metadata::factory::MetadataListFactory,
    revocation::provisioner::RevocationListProvisioner,
};

use super::error::IssuingServiceError;

/// Output of [`IssuingService::prepare`], input of [`IssuingService::anchor`].
#[derive(Debug, Clone)]
pub struct PreparedIssuance {
    /// One per offer, in offer order.
    pub vcs: Vec<BuiltCredential>,
    pub revocation_list_entries: Vec<AllocationListEntry>,
}

pub struct IssuingService {
    allocator: Arc<ListAllocator>,
    repository: Arc<AllocationListRepository>,
    credential_builder: Arc<CredentialBuilder>,
    revocation_provisioner: Arc<RevocationListProvisioner>,
    metadata_list_factory: Arc<MetadataListFactory>,
    revocation_list_size: u64,
    metadata_list_size: u64,
}

impl IssuingService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        allocator: Arc<ListAllocator>,
        repository: Arc<AllocationListRepository>,
        credential_builder: Arc<CredentialBuilder>,
        revocation_provisioner: Arc<RevocationListProvisioner>,
        metadata_list_factory: Arc<MetadataListFactory>,
        revocation_list_size: u64,
        metadata_list_size: u64,
    ) -> Self {
        Self {
            allocator,
            repository,
            credential_builder,
            revocation_provisioner,
            metadata_list_factory,
            revocation_list_size,
            metadata_list_size,
        }
    }

    /// Allocates a revocation and a metadata slot per offer, then builds all
    /// credentials. No ledger writes.
    pub async fn prepare(
        &self,
        offers: &[VelocityOffer],
        credential_subject_id: Option<&str>,
        issuer: &Issuer,
        credential_types: &CredentialTypesMap,
    ) -> Result<PreparedIssuance, IssuingServiceError> {
        let revocation_list_entries = self
            .allocator
            .allocate_list_entries(
                offers.len(),
                issuer,
                AllocationEntity::RevocationList,
                self.revocation_list_size,
            )
            .await?;
        let metadata_entries = self
            .allocator
            .allocate_list_entries(
                offers.len(),
                issuer,
                AllocationEntity::MetadataList,
                self.metadata_list_size,
            )
            .await?;

        let operator_address = self.repository.operator_address(issuer).await?;

        let vcs = self
            .credential_builder
            .build_verifiable_credentials(
                offers,
                credential_subject_id,
                issuer,
                &metadata_entries,
                &revocation_list_entries,
                credential_types,
                &operator_address,
            )
            .await?;

        Ok(PreparedIssuance {
            vcs,
            revocation_list_entries,
        })
    }

    /// Provisions new revocation lists, then new metadata lists, then writes
    /// every metadata entry. Each step runs concurrently and the first failure
    /// aborts the call. Returns the VC-JWTs in offer order.
    pub async fn anchor(
        &self,
        prepared: &PreparedIssuance,
        issuer: &Issuer,
    ) -> Result<Vec<String>, IssuingServiceError> {
        if prepared.vcs.is_empty() {
            return Ok(vec![]);
        }

        self.revocation_provisioner
            .provision_new_lists(issuer, &prepared.revocation_list_entries)
            .await?;

        let metadata_list = self.metadata_list_factory.connect(issuer).await?;

        let new_metadata_lists: Vec<u64> = prepared
            .vcs
            .iter()
            .map(|vc| vc.metadata.entry)
            .filter(|entry| entry.is_new_list)
            .map(|entry| entry.list_id)
            .unique()
            .collect();

        try_join_all(
            new_metadata_lists
                .iter()
                .map(|list_id| metadata_list.create_list(*list_id)),
        )
        .await?;

        try_join_all(
            prepared
                .vcs
                .iter()
                .map(|vc| metadata_list.add_entry(&vc.metadata)),
        )
        .await?;

        tracing::info!(
            tenant_id = %issuer.tenant_id,
            credentials = prepared.vcs.len(),
            "credentials anchored"
        );

        Ok(prepared.vcs.iter().map(|vc| vc.vc_jwt.to_owned()).collect())
    }

    /// [`Self::prepare`] followed by [`Self::anchor`].
    pub async fn issue(
        &self,
        offers: &[VelocityOffer],
        credential_subject_id: Option<&str>,
        issuer: &Issuer,
        credential_types: &CredentialTypesMap,
    ) -> Result<Vec<String>, IssuingServiceError> {
        let prepared = self
            .prepare(offers, credential_subject_id, issuer, credential_types)
            .await?;

        self.anchor(&prepared, issuer).await
    }
}
