//! Issuance of ledger-anchored verifiable credentials for many tenants.
//!
//! The crate wires the building blocks of `issuing-providers` into one
//! [`IssuingService`](service::issuing_service::IssuingService). Callers supply
//! the collaborators that live outside this library: the allocation store, the
//! KMS and the two ledger clients.
//!
//! ```ignore rust
//! let core = IssuingCore::new(
//!     config,
//!     storage,
//!     kms,
//!     revocation_ledger_provider,
//!     metadata_ledger_provider,
//! );
//!
//! let jwts = core
//!     .issuing_service
//!     .issue(&offers, None, &issuer, &credential_types)
//!     .await?;
//! ```

use std::{collections::HashMap, sync::Arc};

use config::IssuingConfig;
use issuing_crypto::imp::{
    hasher::{keccak256::Keccak256, sha256::SHA256},
    signer::{es256::ES256Signer, es256k::ES256KSigner},
    CryptoProviderImpl,
};
use issuing_providers::{
    allocation::{
        allocator::ListAllocator, repository::AllocationListRepository, AllocationListStorage,
    },
    credential_builder::CredentialBuilder,
    crypto::CryptoProvider,
    key_algorithm::{
        imp::{es256::Es256, provider::KeyAlgorithmProviderImpl, secp256k1::Secp256k1},
        provider::KeyAlgorithmProvider,
        KeyAlgorithm,
    },
    kms::Kms,
    metadata::{factory::MetadataListFactory, MetadataLedgerProvider},
    revocation::{provisioner::RevocationListProvisioner, RevocationLedgerProvider},
};
use model::{HasherType, KeyAlgorithmType, SignerType};
use service::issuing_service::IssuingService;

pub mod config;
pub mod model;
pub mod service;

pub struct IssuingCore {
    pub issuing_service: IssuingService,
    pub key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
}

impl IssuingCore {
    pub fn new(
        config: IssuingConfig,
        storage: Arc<dyn AllocationListStorage>,
        kms: Arc<dyn Kms>,
        revocation_ledger_provider: Arc<dyn RevocationLedgerProvider>,
        metadata_ledger_provider: Arc<dyn MetadataLedgerProvider>,
    ) -> Self {
        let crypto_provider = default_crypto_provider();
        let key_algorithm_provider = default_key_algorithm_provider(crypto_provider.clone());

        let repository = Arc::new(AllocationListRepository::new(storage, kms.clone()));
        let allocator = Arc::new(ListAllocator::new(
            repository.clone(),
            config.allocator_params(),
        ));

        let credential_builder = Arc::new(CredentialBuilder::new(
            crypto_provider,
            key_algorithm_provider.clone(),
            config.builder_params(),
        ));

        let revocation_provisioner = Arc::new(RevocationListProvisioner::new(
            revocation_ledger_provider,
            config.cao_did.to_owned().into(),
        ));

        let metadata_list_factory = Arc::new(MetadataListFactory::new(
            metadata_ledger_provider,
            kms,
            config.metadata_params(),
        ));

        let issuing_service = IssuingService::new(
            allocator,
            repository,
            credential_builder,
            revocation_provisioner,
            metadata_list_factory,
            config.revocation_list_size,
            config.metadata_list_size,
        );

        Self {
            issuing_service,
            key_algorithm_provider,
        }
    }
}

pub fn default_crypto_provider() -> Arc<dyn CryptoProvider> {
    Arc::new(CryptoProviderImpl::new(
        HashMap::from_iter(vec![
            (HasherType::Sha256.to_string(), Arc::new(SHA256 {}) as _),
            (HasherType::Keccak256.to_string(), Arc::new(Keccak256 {}) as _),
        ]),
        HashMap::from_iter(vec![
            (SignerType::Es256k.to_string(), Arc::new(ES256KSigner {}) as _),
            (SignerType::Es256.to_string(), Arc::new(ES256Signer {}) as _),
        ]),
    ))
}

/// Key algorithms available for credential keys and KMS-held keys.
pub fn default_key_algorithm_provider(
    crypto_provider: Arc<dyn CryptoProvider>,
) -> Arc<dyn KeyAlgorithmProvider> {
    let key_algorithms: HashMap<String, Arc<dyn KeyAlgorithm>> = HashMap::from_iter(vec![
        (
            KeyAlgorithmType::Secp256k1.to_string(),
            Arc::new(Secp256k1) as _,
        ),
        (KeyAlgorithmType::Es256.to_string(), Arc::new(Es256) as _),
    ]);

    Arc::new(KeyAlgorithmProviderImpl::new(key_algorithms, crypto_provider))
}
