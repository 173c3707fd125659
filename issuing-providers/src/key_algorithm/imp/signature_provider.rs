use std::sync::Arc;

use zeroize::Zeroizing;

use crate::{
    crypto::{Signer, SignerError},
    jwt::model::SignatureProvider,
};

/// Signs with an in-memory key pair, used for the single-use credential keys.
pub struct KeyPairSignatureProvider {
    pub signer: Arc<dyn Signer>,
    pub public_key: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
    pub key_id: Option<String>,
}

#[async_trait::async_trait]
impl SignatureProvider for KeyPairSignatureProvider {
    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        self.signer
            .sign(message, &self.public_key, self.private_key.as_slice())
    }

    fn get_key_id(&self) -> Option<String> {
        self.key_id.to_owned()
    }

    fn get_public_key(&self) -> Vec<u8> {
        self.public_key.to_owned()
    }
}
