use std::{collections::HashMap, sync::Arc};

use maplit::hashmap;
use serde_json::json;
use uuid::Uuid;

use super::{
    credential_id,
    error::BuilderError,
    json_ld::{BASE_CONTEXT, LAYER1_TYPE, LAYER2_TYPE, REVOCATION_STATUS_TYPE},
    model::{BuiltCredential, CredentialTypeMetadata, CredentialTypesMap, VcClaims, VelocityOffer},
    CredentialBuilder, Params,
};
use crate::{
    allocation::model::AllocationListEntry,
    common_models::issuer::Issuer,
    crypto::{
        imp::{
            hasher::{keccak256::Keccak256, sha256::SHA256},
            signer::{es256::ES256Signer, es256k::ES256KSigner},
            CryptoProviderImpl,
        },
        Hasher, Signer,
    },
    jwt::Jwt,
    key_algorithm::{
        imp::{es256::Es256, provider::KeyAlgorithmProviderImpl, secp256k1::Secp256k1},
        provider::KeyAlgorithmProvider,
        KeyAlgorithm,
    },
};

const PRIMARY_ADDRESS: &str = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";
const OPERATOR_ADDRESS: &str = "0x1111111111111111111111111111111111111111";
const EMAIL_CONTEXT: &str = "https://lib.velocitynetwork.foundation/layer1-v1.1.jsonld.json";
const EXTENSIONS_CONTEXT: &str = "https://registrar.velocitynetwork.foundation/contexts/extensions";

fn issuer() -> Issuer {
    Issuer {
        tenant_id: "tenant-1".to_string().into(),
        did: "did:ion:issuer".to_string().into(),
        dlt_primary_address: PRIMARY_ADDRESS.to_string(),
        dlt_operator_address: Some(OPERATOR_ADDRESS.to_string()),
        dlt_operator_key_id: Uuid::new_v4().into(),
        issuing_service_key_id: Uuid::new_v4().into(),
        issuing_service_did_key_id: "key-2".to_string(),
    }
}

fn params() -> Params {
    Params {
        revocation_contract_address: "0xREVOCATION".to_string(),
        credential_extensions_context_url: Some(EXTENSIONS_CONTEXT.to_string()),
        credential_subject_context: false,
        refresh_service_url: None,
        default_signature_algorithm: "SECP256K1".to_string(),
    }
}

fn key_algorithm_provider() -> Arc<dyn KeyAlgorithmProvider> {
    Arc::new(KeyAlgorithmProviderImpl::new(
        hashmap! {
            "SECP256K1".to_string() => Arc::new(Secp256k1) as _,
            "ES256".to_string() => Arc::new(Es256) as _,
        },
        Arc::new(crypto_provider()),
    ))
}

fn crypto_provider() -> CryptoProviderImpl {
    CryptoProviderImpl::new(
        hashmap! {
            "sha-256".to_string() => Arc::new(SHA256 {}) as _,
            "keccak-256".to_string() => Arc::new(Keccak256 {}) as _,
        },
        hashmap! {
            "ES256K".to_string() => Arc::new(ES256KSigner {}) as _,
            "ES256".to_string() => Arc::new(ES256Signer {}) as _,
        },
    )
}

fn builder(params: Params) -> CredentialBuilder {
    CredentialBuilder::new(
        Arc::new(crypto_provider()),
        key_algorithm_provider(),
        params,
    )
}

fn credential_types() -> CredentialTypesMap {
    hashmap! {
        "EmailV1.0".to_string() => CredentialTypeMetadata {
            schema_url: "https://schemas.example/email-v1.0.schema.json".to_string(),
            json_ld_context: vec![EMAIL_CONTEXT.to_string()],
            layer1: true,
            default_signature_algorithm: None,
        },
        "PastEmploymentPosition".to_string() => CredentialTypeMetadata {
            schema_url: "https://schemas.example/past-employment.schema.json".to_string(),
            json_ld_context: vec![],
            layer1: false,
            default_signature_algorithm: Some("ES256".to_string()),
        },
    }
}

fn email_offer() -> VelocityOffer {
    serde_json::from_value(json!({
        "_id": "6406e8e6d0f2b5a1c3e4f567",
        "exchangeId": "6406e8e6d0f2b5a1c3e4f500",
        "offerCreationDate": "2024-01-01",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "type": ["EmailV1.0"],
        "issuer": { "vendorOrganizationId": "acme-1", "name": "ACME" },
        "credentialSubject": {
            "vendorUserId": "user-42",
            "email": "adam.smith@example.com"
        },
        "offerId": "offer-1"
    }))
    .unwrap()
}

fn entry(list_id: u64, index: u64) -> AllocationListEntry {
    AllocationListEntry {
        list_id,
        index,
        is_new_list: false,
    }
}

async fn build_one(
    builder: &CredentialBuilder,
    offer: VelocityOffer,
    credential_subject_id: Option<&str>,
) -> Result<BuiltCredential, BuilderError> {
    builder
        .build_verifiable_credentials(
            &[offer],
            credential_subject_id,
            &issuer(),
            &[entry(4, 17)],
            &[entry(9, 3)],
            &credential_types(),
            OPERATOR_ADDRESS,
        )
        .await
        .map(|mut built| built.remove(0))
}

#[tokio::test]
async fn test_build_email_credential() {
    let built = build_one(&builder(params()), email_offer(), None)
        .await
        .unwrap();

    let token = Jwt::<VcClaims>::decompose_token(&built.vc_jwt).unwrap();
    let expected_id = format!("did:velocity:v2:{}:4:17", PRIMARY_ADDRESS.to_lowercase());

    assert_eq!(token.header.algorithm, "ES256K");
    assert_eq!(token.header.key_id, Some(format!("{expected_id}#key-1")));
    assert_eq!(token.payload.jwt_id, Some(expected_id.clone()));
    assert_eq!(token.payload.issuer.as_deref(), Some("did:ion:issuer"));
    assert_eq!(token.payload.subject, None);
    assert_eq!(token.payload.invalid_before, token.payload.issued_at);

    let vc = &token.payload.custom.vc;
    assert_eq!(
        vc["type"],
        json!(["VerifiableCredential", "EmailV1.0", LAYER1_TYPE])
    );
    assert_eq!(vc["credentialStatus"]["type"], REVOCATION_STATUS_TYPE);
    assert_eq!(
        vc["credentialStatus"]["id"],
        format!("ethereum:0xREVOCATION/getRevokedStatus?address={OPERATOR_ADDRESS}&listId=9&index=3")
    );
    assert_eq!(vc["credentialStatus"]["statusListIndex"], 3);
    assert_eq!(vc["id"], expected_id);
    assert_eq!(vc["vnfProtocolVersion"], 1);
    assert_eq!(vc["issuer"], json!({ "id": "did:ion:issuer", "name": "ACME" }));
    assert_eq!(
        vc["credentialSubject"],
        json!({ "email": "adam.smith@example.com" })
    );
    assert_eq!(
        vc["credentialSchema"],
        json!({
            "type": "JsonSchemaValidator2018",
            "id": "https://schemas.example/email-v1.0.schema.json"
        })
    );
    assert_eq!(vc["contentHash"]["value"], built.metadata.content_hash);
    assert!(vc.get("refreshService").is_none());
    for field in ["_id", "exchangeId", "offerCreationDate", "createdAt", "offerId"] {
        assert!(vc.get(field).is_none(), "{field} leaked into the credential");
    }
    assert_eq!(&built.json_ld_credential, vc);

    let metadata = &built.metadata;
    assert_eq!(metadata.entry, entry(4, 17));
    assert_eq!(metadata.credential_type, "EmailV1.0");
    let keccak = Keccak256 {}.hash(b"EmailV1.0").unwrap();
    assert_eq!(
        metadata.credential_type_encoded,
        format!("0x{:02x}{:02x}", keccak[0], keccak[1])
    );

    let public_key = Secp256k1.jwk_to_bytes(&metadata.public_key).unwrap();
    ES256KSigner {}
        .verify(
            token.signing_input.as_bytes(),
            &token.signature,
            &public_key,
        )
        .unwrap();
}

#[tokio::test]
async fn test_subject_bound_credential() {
    let built = build_one(&builder(params()), email_offer(), Some("did:jwk:holder"))
        .await
        .unwrap();

    let token = Jwt::<VcClaims>::decompose_token(&built.vc_jwt).unwrap();
    assert_eq!(token.payload.subject.as_deref(), Some("did:jwk:holder"));

    let vc = &token.payload.custom.vc;
    assert_eq!(vc["credentialSubject"]["id"], "did:jwk:holder");
    assert_eq!(vc["vnfProtocolVersion"], 2);
}

#[tokio::test]
async fn test_contexts_are_not_duplicated() {
    let mut offer = email_offer();
    offer.context = vec![BASE_CONTEXT.to_string(), EMAIL_CONTEXT.to_string()];

    let built = build_one(&builder(params()), offer, None).await.unwrap();

    assert_eq!(
        built.json_ld_credential["@context"],
        json!([BASE_CONTEXT, EMAIL_CONTEXT, EXTENSIONS_CONTEXT])
    );
}

#[tokio::test]
async fn test_subject_context_embedding() {
    let built = build_one(
        &builder(Params {
            credential_subject_context: true,
            ..params()
        }),
        email_offer(),
        None,
    )
    .await
    .unwrap();

    assert_eq!(
        built.json_ld_credential["credentialSubject"]["@context"],
        built.json_ld_credential["@context"]
    );
}

#[tokio::test]
async fn test_existing_status_and_refresh_are_kept() {
    let offer_status = json!({ "id": "https://status.example/1", "type": "StatusList2021Entry" });
    let offer_refresh = json!({ "id": "https://refresh.example/1", "type": "ManualRefreshService2018" });

    let mut offer = email_offer();
    offer.credential_status = vec![offer_status.clone()];
    offer.refresh_service = vec![offer_refresh.clone()];

    let built = build_one(
        &builder(Params {
            refresh_service_url: Some("https://issuer.example/refresh".to_string()),
            ..params()
        }),
        offer,
        None,
    )
    .await
    .unwrap();

    let status = built.json_ld_credential["credentialStatus"]
        .as_array()
        .unwrap();
    assert_eq!(status.len(), 2);
    assert_eq!(status[0], offer_status);
    assert_eq!(status[1]["type"], REVOCATION_STATUS_TYPE);

    let refresh = built.json_ld_credential["refreshService"]
        .as_array()
        .unwrap();
    assert_eq!(refresh.len(), 2);
    assert_eq!(refresh[0], offer_refresh);
}

#[tokio::test]
async fn test_own_refresh_service_is_single_object() {
    let built = build_one(
        &builder(Params {
            refresh_service_url: Some("https://issuer.example/refresh".to_string()),
            ..params()
        }),
        email_offer(),
        None,
    )
    .await
    .unwrap();

    let refresh = &built.json_ld_credential["refreshService"];
    assert!(refresh.is_object());
    assert!(refresh["id"]
        .as_str()
        .unwrap()
        .starts_with("https://issuer.example/refresh?credential_id=did%3Avelocity%3Av2%3A"));
}

#[tokio::test]
async fn test_content_hash_ignores_key_order() {
    let first: VelocityOffer = serde_json::from_value(json!({
        "type": "EmailV1.0",
        "validFrom": "2024-01-01T00:00:00Z",
        "credentialSubject": { "email": "a@example.com", "name": { "given": "A", "family": "B" } }
    }))
    .unwrap();
    let second: VelocityOffer = serde_json::from_value(json!({
        "credentialSubject": { "name": { "family": "B", "given": "A" }, "email": "a@example.com" },
        "validFrom": "2024-01-01T00:00:00Z",
        "type": ["EmailV1.0"]
    }))
    .unwrap();

    let sha256 = SHA256 {};
    let first_hash = super::content_hash::content_hash(&first, &sha256).unwrap();
    let second_hash = super::content_hash::content_hash(&second, &sha256).unwrap();
    assert_eq!(first_hash, second_hash);

    let mut third = second.clone();
    third
        .credential_subject
        .insert("email".to_string(), json!("b@example.com"));
    assert_ne!(
        first_hash,
        super::content_hash::content_hash(&third, &sha256).unwrap()
    );
}

#[tokio::test]
async fn test_validity_window_maps_to_jwt_claims() {
    let mut offer = email_offer();
    offer.valid_from = Some(time::macros::datetime!(2024-01-01 0:00 UTC));
    offer.valid_until = Some(time::macros::datetime!(2030-01-01 0:00 UTC));

    let built = build_one(&builder(params()), offer, None).await.unwrap();
    let token = Jwt::<VcClaims>::decompose_token(&built.vc_jwt).unwrap();

    assert_eq!(
        token.payload.invalid_before,
        Some(time::macros::datetime!(2024-01-01 0:00 UTC))
    );
    assert_eq!(
        token.payload.expires_at,
        Some(time::macros::datetime!(2030-01-01 0:00 UTC))
    );
    assert_eq!(token.payload.custom.vc["validUntil"], "2030-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_type_level_signature_algorithm() {
    let offer: VelocityOffer = serde_json::from_value(json!({
        "type": ["PastEmploymentPosition"],
        "credentialSubject": { "company": "ACME" }
    }))
    .unwrap();

    let built = build_one(&builder(params()), offer, None).await.unwrap();
    let token = Jwt::<VcClaims>::decompose_token(&built.vc_jwt).unwrap();

    assert_eq!(token.header.algorithm, "ES256");
    assert_eq!(built.metadata.public_key.crv, "P-256");
    assert_eq!(
        token.payload.custom.vc["type"],
        json!(["VerifiableCredential", "PastEmploymentPosition", LAYER2_TYPE])
    );
}

#[tokio::test]
async fn test_unknown_credential_type() {
    let offer: VelocityOffer = serde_json::from_value(json!({
        "type": ["DriversLicenseV1.0"],
        "credentialSubject": {}
    }))
    .unwrap();

    let result = build_one(&builder(params()), offer, None).await;
    assert!(matches!(
        result,
        Err(BuilderError::UnknownCredentialType(t)) if t == "DriversLicenseV1.0"
    ));
}

#[tokio::test]
async fn test_batch_preserves_order_and_uses_fresh_keys() {
    let mut second = email_offer();
    second
        .credential_subject
        .insert("email".to_string(), json!("eve@example.com"));

    let built = builder(params())
        .build_verifiable_credentials(
            &[email_offer(), second],
            None,
            &issuer(),
            &[entry(4, 1), entry(4, 2)],
            &[entry(9, 1), entry(9, 2)],
            &credential_types(),
            OPERATOR_ADDRESS,
        )
        .await
        .unwrap();

    assert_eq!(built.len(), 2);
    assert_eq!(built[0].metadata.entry.index, 1);
    assert_eq!(built[1].metadata.entry.index, 2);
    assert_eq!(
        built[1].json_ld_credential["credentialSubject"]["email"],
        "eve@example.com"
    );
    assert_ne!(built[0].metadata.public_key, built[1].metadata.public_key);
}

#[tokio::test]
async fn test_entry_count_mismatch() {
    let result = builder(params())
        .build_verifiable_credentials(
            &[email_offer()],
            None,
            &issuer(),
            &[],
            &[entry(9, 1)],
            &credential_types(),
            OPERATOR_ADDRESS,
        )
        .await;

    assert!(matches!(
        result,
        Err(BuilderError::EntryCountMismatch {
            expected: 1,
            actual: 0
        })
    ));
}

#[test]
fn test_credential_id_lowercases_address() {
    assert_eq!(
        credential_id("0xABCDEF", &entry(12, 7)),
        "did:velocity:v2:0xabcdef:12:7"
    );
}

#[test]
fn test_credential_types_map_deserializes() {
    let types: HashMap<String, CredentialTypeMetadata> = serde_json::from_value(json!({
        "EmailV1.0": {
            "schemaUrl": "https://schemas.example/email.json",
            "jsonLdContext": "https://contexts.example/email",
            "layer1": true
        }
    }))
    .unwrap();

    assert_eq!(
        types["EmailV1.0"].json_ld_context,
        vec!["https://contexts.example/email".to_string()]
    );
    assert_eq!(types["EmailV1.0"].default_signature_algorithm, None);
}
