//! Process-local KMS, keeping key material in memory.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    common_models::key::KeyId,
    jwt::{model::JWTPayload, Jwt},
    key_algorithm::{
        imp::signature_provider::KeyPairSignatureProvider, provider::KeyAlgorithmProvider,
    },
    kms::{
        error::KmsError,
        model::{ExportedKey, SignJwtHeader},
        Kms,
    },
};

#[cfg(test)]
mod test;

struct StoredKey {
    key_type: String,
    public_key: Vec<u8>,
    private_key: Zeroizing<Vec<u8>>,
}

pub struct InMemoryKms {
    key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>,
    keys: RwLock<HashMap<KeyId, StoredKey>>,
}

impl InMemoryKms {
    pub fn new(key_algorithm_provider: Arc<dyn KeyAlgorithmProvider>) -> Self {
        Self {
            key_algorithm_provider,
            keys: RwLock::new(HashMap::new()),
        }
    }

    pub async fn generate(&self, key_type: &str) -> Result<KeyId, KmsError> {
        let key_pair = self
            .key_algorithm_provider
            .get_key_algorithm(key_type)
            .ok_or(KmsError::InvalidKeyAlgorithm(key_type.to_owned()))?
            .generate_key_pair();

        self.store(key_type, key_pair.public, key_pair.private).await
    }

    pub async fn import(
        &self,
        key_type: &str,
        private_key: Zeroizing<Vec<u8>>,
    ) -> Result<KeyId, KmsError> {
        let public_key = self
            .key_algorithm_provider
            .get_key_algorithm(key_type)
            .ok_or(KmsError::InvalidKeyAlgorithm(key_type.to_owned()))?
            .public_key_from_private(&private_key)?;

        self.store(key_type, public_key, private_key).await
    }

    pub async fn public_key(&self, key_id: &KeyId) -> Result<Vec<u8>, KmsError> {
        let keys = self.keys.read().await;
        keys.get(key_id)
            .map(|key| key.public_key.to_owned())
            .ok_or(KmsError::KeyNotFound(*key_id))
    }

    async fn store(
        &self,
        key_type: &str,
        public_key: Vec<u8>,
        private_key: Zeroizing<Vec<u8>>,
    ) -> Result<KeyId, KmsError> {
        let key_id = KeyId::from(Uuid::new_v4());
        self.keys.write().await.insert(
            key_id,
            StoredKey {
                key_type: key_type.to_owned(),
                public_key,
                private_key,
            },
        );
        Ok(key_id)
    }
}

#[async_trait::async_trait]
impl Kms for InMemoryKms {
    async fn export_key_or_secret(&self, key_id: &KeyId) -> Result<ExportedKey, KmsError> {
        let keys = self.keys.read().await;
        let key = keys.get(key_id).ok_or(KmsError::KeyNotFound(*key_id))?;

        Ok(ExportedKey {
            key_type: key.key_type.to_owned(),
            private_key: key.private_key.clone(),
        })
    }

    async fn sign_jwt(
        &self,
        payload: serde_json::Value,
        key_id: &KeyId,
        header: SignJwtHeader,
    ) -> Result<String, KmsError> {
        let (algorithm, auth_fn) = {
            let keys = self.keys.read().await;
            let key = keys.get(key_id).ok_or(KmsError::KeyNotFound(*key_id))?;

            let algorithm = self
                .key_algorithm_provider
                .get_key_algorithm(&key.key_type)
                .ok_or(KmsError::InvalidKeyAlgorithm(key.key_type.to_owned()))?
                .get_signer_algorithm_id();

            let auth_fn = KeyPairSignatureProvider {
                signer: self.key_algorithm_provider.get_signer(&key.key_type)?,
                public_key: key.public_key.to_owned(),
                private_key: key.private_key.clone(),
                key_id: header.key_id,
            };
            (algorithm, auth_fn)
        };

        let jwt = Jwt::new(
            "JWT".to_owned(),
            algorithm,
            auth_fn.key_id.clone(),
            JWTPayload {
                custom: payload,
                ..Default::default()
            },
        );

        Ok(jwt.tokenize(Box::new(auth_fn)).await?)
    }
}
