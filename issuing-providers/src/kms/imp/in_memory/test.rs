use std::{collections::HashMap, sync::Arc};

use serde_json::json;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::InMemoryKms;
use crate::{
    crypto::{
        imp::{signer::es256k::ES256KSigner, CryptoProviderImpl},
        Signer,
    },
    jwt::Jwt,
    key_algorithm::{
        imp::{provider::KeyAlgorithmProviderImpl, secp256k1::Secp256k1},
        model::GeneratedKey,
        provider::{KeyAlgorithmProvider, MockKeyAlgorithmProvider},
        MockKeyAlgorithm,
    },
    kms::{error::KmsError, model::SignJwtHeader, Kms},
};

fn key_algorithm_provider() -> Arc<dyn KeyAlgorithmProvider> {
    let crypto = Arc::new(CryptoProviderImpl::new(
        HashMap::new(),
        HashMap::from([("ES256K".to_string(), Arc::new(ES256KSigner {}) as _)]),
    ));
    Arc::new(KeyAlgorithmProviderImpl::new(
        HashMap::from([("SECP256K1".to_string(), Arc::new(Secp256k1) as _)]),
        crypto,
    ))
}

#[tokio::test]
async fn test_generate_and_export() {
    let mut mock_key_algorithm = MockKeyAlgorithm::default();
    mock_key_algorithm
        .expect_generate_key_pair()
        .times(1)
        .returning(|| GeneratedKey {
            public: vec![1],
            private: Zeroizing::new(vec![1, 2, 3]),
        });

    let arc = Arc::new(mock_key_algorithm);

    let mut mock_key_algorithm_provider = MockKeyAlgorithmProvider::default();
    mock_key_algorithm_provider
        .expect_get_key_algorithm()
        .times(1)
        .returning(move |_| Some(arc.clone()));

    let kms = InMemoryKms::new(Arc::new(mock_key_algorithm_provider));

    let key_id = kms.generate("SECP256K1").await.unwrap();
    let exported = kms.export_key_or_secret(&key_id).await.unwrap();

    assert_eq!(exported.key_type, "SECP256K1");
    assert_eq!(exported.private_key.as_slice(), &[1, 2, 3]);
}

#[tokio::test]
async fn test_generate_unknown_algorithm() {
    let kms = InMemoryKms::new(key_algorithm_provider());

    let result = kms.generate("RSA").await;
    assert!(matches!(result, Err(KmsError::InvalidKeyAlgorithm(alg)) if alg == "RSA"));
}

#[tokio::test]
async fn test_export_missing_key() {
    let kms = InMemoryKms::new(key_algorithm_provider());

    let result = kms.export_key_or_secret(&Uuid::new_v4().into()).await;
    assert!(matches!(result, Err(KmsError::KeyNotFound(_))));
}

#[tokio::test]
async fn test_import_derives_public_key() {
    let kms = InMemoryKms::new(key_algorithm_provider());
    let (private, public) = ES256KSigner::random();

    let key_id = kms
        .import("SECP256K1", Zeroizing::new(private))
        .await
        .unwrap();

    assert_eq!(kms.public_key(&key_id).await.unwrap(), public);
}

#[tokio::test]
async fn test_sign_jwt() {
    let kms = InMemoryKms::new(key_algorithm_provider());
    let key_id = kms.generate("SECP256K1").await.unwrap();

    let token = kms
        .sign_jwt(
            json!({ "iss": "did:ion:issuer", "vc": { "type": ["VerifiableCredential"] } }),
            &key_id,
            SignJwtHeader {
                key_id: Some("did:ion:issuer#key-1".to_string()),
            },
        )
        .await
        .unwrap();

    let decomposed = Jwt::<serde_json::Value>::decompose_token(&token).unwrap();
    assert_eq!(decomposed.header.algorithm, "ES256K");
    assert_eq!(
        decomposed.header.key_id.as_deref(),
        Some("did:ion:issuer#key-1")
    );
    assert_eq!(decomposed.payload.issuer.as_deref(), Some("did:ion:issuer"));
    assert_eq!(
        decomposed.payload.custom["vc"]["type"],
        json!(["VerifiableCredential"])
    );

    let public_key = kms.public_key(&key_id).await.unwrap();
    ES256KSigner {}
        .verify(
            decomposed.signing_input.as_bytes(),
            &decomposed.signature,
            &public_key,
        )
        .unwrap();
}
