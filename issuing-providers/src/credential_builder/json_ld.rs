//! Assembly of the unsigned JSON-LD credential document.

use itertools::Itertools;
use serde_json::{json, Map, Value};
use time::OffsetDateTime;
use url::Url;

use super::{
    content_hash::format_rfc3339,
    error::FormatterError,
    model::{CredentialTypeMetadata, VelocityOffer},
};
use crate::allocation::model::AllocationListEntry;

pub const BASE_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";
pub const REVOCATION_STATUS_TYPE: &str = "VelocityRevocationListJan2021";
pub const CONTENT_HASH_TYPE: &str = "VelocityContentHash2020";
pub const REFRESH_SERVICE_TYPE: &str = "VelocityNetworkRefreshService2024";
pub const LAYER1_TYPE: &str = "VelocityNetworkLayer1Credential";
pub const LAYER2_TYPE: &str = "VelocityNetworkLayer2Credential";
const SCHEMA_VALIDATOR_TYPE: &str = "JsonSchemaValidator2018";

const ANONYMOUS_PROTOCOL_VERSION: u8 = 1;
const SUBJECT_BOUND_PROTOCOL_VERSION: u8 = 2;

/// Offer fields that never reach the credential: storage and exchange
/// bookkeeping, plus everything placed explicitly by [`assemble_credential`].
const HOUSEKEEPING_FIELDS: [&str; 11] = [
    "_id",
    "id",
    "exchangeId",
    "offerId",
    "offerCreationDate",
    "offerExpirationDate",
    "createdAt",
    "updatedAt",
    "issuanceDate",
    "contentHash",
    "vnfProtocolVersion",
];

const VENDOR_USER_ID_FIELD: &str = "vendorUserId";
const VENDOR_ORGANIZATION_ID_FIELD: &str = "vendorOrganizationId";

pub(super) struct CredentialContent<'a> {
    pub offer: &'a VelocityOffer,
    pub type_metadata: &'a CredentialTypeMetadata,
    pub credential_id: &'a str,
    pub issuer_did: &'a str,
    pub credential_subject_id: Option<&'a str>,
    pub content_hash: &'a str,
    pub revocation_status: Value,
    pub refresh_service: Option<Value>,
    pub issued_at: OffsetDateTime,
}

pub(super) struct ContextOptions<'a> {
    pub extensions_context_url: Option<&'a str>,
    pub embed_subject_context: bool,
}

pub(super) fn assemble_credential(
    content: CredentialContent<'_>,
    options: &ContextOptions<'_>,
) -> Result<Value, FormatterError> {
    let offer = content.offer;

    let contexts = merge_contexts(
        &content.type_metadata.json_ld_context,
        &offer.context,
        options.extensions_context_url,
    );

    let mut subject = offer.credential_subject.clone();
    subject.remove(VENDOR_USER_ID_FIELD);
    if let Some(subject_id) = content.credential_subject_id {
        subject.insert("id".to_owned(), json!(subject_id));
    }
    if options.embed_subject_context {
        subject.insert("@context".to_owned(), json!(contexts));
    }

    let mut credential: Map<String, Value> = offer.rest.clone();
    for field in HOUSEKEEPING_FIELDS {
        credential.remove(field);
    }

    credential.insert("@context".to_owned(), json!(contexts));
    credential.insert("id".to_owned(), json!(content.credential_id));
    credential.insert(
        "type".to_owned(),
        json!(merge_types(&offer.r#type, content.type_metadata.layer1)),
    );
    credential.insert(
        "issuer".to_owned(),
        build_issuer(offer.issuer.as_ref(), content.issuer_did),
    );
    credential.insert("credentialSubject".to_owned(), Value::Object(subject));
    if let Some(status) =
        append_polymorphic(&offer.credential_status, Some(content.revocation_status))
    {
        credential.insert("credentialStatus".to_owned(), status);
    }
    if let Some(refresh_service) =
        append_polymorphic(&offer.refresh_service, content.refresh_service)
    {
        credential.insert("refreshService".to_owned(), refresh_service);
    }
    credential.insert(
        "credentialSchema".to_owned(),
        offer.credential_schema.clone().unwrap_or_else(|| {
            json!({
                "type": SCHEMA_VALIDATOR_TYPE,
                "id": content.type_metadata.schema_url,
            })
        }),
    );
    credential.insert(
        "contentHash".to_owned(),
        json!({
            "type": CONTENT_HASH_TYPE,
            "value": content.content_hash,
        }),
    );
    credential.insert(
        "issuanceDate".to_owned(),
        json!(format_rfc3339(content.issued_at)?),
    );
    if let Some(valid_from) = offer.valid_from {
        credential.insert("validFrom".to_owned(), json!(format_rfc3339(valid_from)?));
    }
    if let Some(valid_until) = offer.valid_until {
        credential.insert("validUntil".to_owned(), json!(format_rfc3339(valid_until)?));
    }
    credential.insert(
        "vnfProtocolVersion".to_owned(),
        json!(match content.credential_subject_id {
            Some(_) => SUBJECT_BOUND_PROTOCOL_VERSION,
            None => ANONYMOUS_PROTOCOL_VERSION,
        }),
    );

    Ok(Value::Object(credential))
}

/// Base context, then type contexts, offer contexts and the tenant extension,
/// deduplicated in first-seen order.
pub fn merge_contexts(
    type_contexts: &[String],
    offer_contexts: &[String],
    extensions_context_url: Option<&str>,
) -> Vec<String> {
    std::iter::once(BASE_CONTEXT)
        .chain(type_contexts.iter().map(String::as_str))
        .chain(offer_contexts.iter().map(String::as_str))
        .chain(extensions_context_url)
        .unique()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn merge_types(offer_types: &[String], layer1: bool) -> Vec<String> {
    let layer = if layer1 { LAYER1_TYPE } else { LAYER2_TYPE };

    std::iter::once("VerifiableCredential")
        .chain(offer_types.iter().map(String::as_str))
        .chain(std::iter::once(layer))
        .unique()
        .map(ToOwned::to_owned)
        .collect()
}

/// Keeps entries declared by the offer and adds `own` after them. A single
/// entry is returned bare, several as an array.
pub fn append_polymorphic(existing: &[Value], own: Option<Value>) -> Option<Value> {
    let mut entries: Vec<Value> = existing.to_vec();
    entries.extend(own);

    match entries.len() {
        0 => None,
        1 => entries.pop(),
        _ => Some(Value::Array(entries)),
    }
}

fn build_issuer(offer_issuer: Option<&Value>, issuer_did: &str) -> Value {
    match offer_issuer {
        Some(Value::Object(fields)) => {
            let mut issuer = fields.clone();
            issuer.remove(VENDOR_ORGANIZATION_ID_FIELD);
            issuer.insert("id".to_owned(), json!(issuer_did));
            Value::Object(issuer)
        }
        _ => json!({ "id": issuer_did }),
    }
}

/// `ethereum:` read call on the revocation contract for one slot.
pub fn revocation_url(
    contract_address: &str,
    operator_address: &str,
    entry: &AllocationListEntry,
) -> Result<String, FormatterError> {
    let mut url = revocation_list_url(contract_address, operator_address, entry.list_id)?;
    url.query_pairs_mut()
        .append_pair("index", &entry.index.to_string());
    Ok(url.to_string())
}

fn revocation_list_url(
    contract_address: &str,
    operator_address: &str,
    list_id: u64,
) -> Result<Url, FormatterError> {
    let mut url = Url::parse(&format!("ethereum:{contract_address}/getRevokedStatus"))?;
    url.query_pairs_mut()
        .append_pair("address", operator_address)
        .append_pair("listId", &list_id.to_string());
    Ok(url)
}

pub(super) fn revocation_status(
    contract_address: &str,
    operator_address: &str,
    entry: &AllocationListEntry,
) -> Result<Value, FormatterError> {
    Ok(json!({
        "id": revocation_url(contract_address, operator_address, entry)?,
        "type": REVOCATION_STATUS_TYPE,
        "statusListIndex": entry.index,
        "statusListCredential":
            revocation_list_url(contract_address, operator_address, entry.list_id)?.to_string(),
    }))
}

pub(super) fn refresh_service(
    refresh_service_url: &str,
    credential_id: &str,
) -> Result<Value, FormatterError> {
    let mut url = Url::parse(refresh_service_url)?;
    url.query_pairs_mut()
        .append_pair("credential_id", credential_id);

    Ok(json!({
        "type": REFRESH_SERVICE_TYPE,
        "id": url.to_string(),
    }))
}
