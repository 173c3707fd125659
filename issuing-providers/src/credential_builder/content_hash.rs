//! Integrity digests over offer content.

use ct_codecs::{Encoder, Hex};
use serde_json::{json, Map, Value};
use time::format_description::well_known::Rfc3339;

use super::{
    error::{BuilderError, FormatterError},
    model::VelocityOffer,
};
use crate::crypto::Hasher;

/// SHA-256 hex digest of the subject and validity window of `offer`.
///
/// Object keys are sorted recursively before hashing, so the digest does not
/// depend on the order properties were inserted in.
pub fn content_hash(offer: &VelocityOffer, hasher: &dyn Hasher) -> Result<String, BuilderError> {
    let mut content = Map::new();
    content.insert(
        "credentialSubject".to_owned(),
        Value::Object(offer.credential_subject.clone()),
    );
    if let Some(valid_from) = offer.valid_from {
        content.insert("validFrom".to_owned(), json!(format_rfc3339(valid_from)?));
    }
    if let Some(valid_until) = offer.valid_until {
        content.insert("validUntil".to_owned(), json!(format_rfc3339(valid_until)?));
    }

    let canonical = serde_json::to_vec(&canonicalize(Value::Object(content)))
        .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))?;

    Ok(hasher.hash_hex(&canonical)?)
}

/// `0x`-prefixed hex of the first two bytes of Keccak-256(`credential_type`).
pub fn encode_credential_type(
    credential_type: &str,
    keccak: &dyn Hasher,
) -> Result<String, BuilderError> {
    let digest = keccak.hash(credential_type.as_bytes())?;
    let prefix = digest
        .get(..2)
        .ok_or(FormatterError::CouldNotFormat("digest too short".to_owned()))?;

    let encoded = Hex::encode_to_string(prefix)
        .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))?;
    Ok(format!("0x{encoded}"))
}

pub(super) fn format_rfc3339(value: time::OffsetDateTime) -> Result<String, FormatterError> {
    value
        .format(&Rfc3339)
        .map_err(|e| FormatterError::CouldNotFormat(e.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect(),
            )
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
