//! Compact JWS framing for VC-JWTs and attestation tokens.

use std::fmt::Debug;

use ct_codecs::{Base64UrlSafeNoPadding, Decoder};
use serde::{de::DeserializeOwned, Serialize};

use self::{
    error::JwtError,
    mapper::{bin_to_b64url_string, string_to_b64url_string},
    model::{AuthenticationFn, DecomposedToken, JWTHeader, JWTPayload},
};

pub mod error;
pub mod mapper;
pub mod model;


#[derive(Debug)]
pub struct Jwt<Payload: Serialize + DeserializeOwned + Debug> {
    pub header: JWTHeader,
    pub payload: JWTPayload<Payload>,
}

impl<Payload: Serialize + DeserializeOwned + Debug> Jwt<Payload> {
    pub fn new(
        signature_type: String,
        algorithm: String,
        key_id: Option<String>,
        payload: JWTPayload<Payload>,
    ) -> Jwt<Payload> {
        let header = JWTHeader {
            signature_type: Some(signature_type),
            algorithm,
            key_id,
        };

        Jwt { header, payload }
    }

    pub async fn tokenize(&self, auth_fn: AuthenticationFn) -> Result<String, JwtError> {
        let jwt_header_json = serde_json::to_string(&self.header)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
        let payload_json = serde_json::to_string(&self.payload)
            .map_err(|e| JwtError::CouldNotFormat(e.to_string()))?;
        let mut token = format!(
            "{}.{}",
            string_to_b64url_string(&jwt_header_json)?,
            string_to_b64url_string(&payload_json)?,
        );

        let signature = auth_fn
            .sign(token.as_bytes())
            .await
            .map_err(|e| JwtError::CouldNotSign(e.to_string()))?;

        let signature_encoded = bin_to_b64url_string(&signature)?;

        token.push('.');
        token.push_str(&signature_encoded);

        Ok(token)
    }

    /// Splits a compact token into its parts without verifying the signature.
    pub fn decompose_token(token: &str) -> Result<DecomposedToken<Payload>, JwtError> {
        let token = token.trim_matches(|c: char| c == '.' || c.is_whitespace());
        let mut jwt_parts = token.splitn(3, '.');

        let (Some(header), Some(payload), Some(signature)) =
            (jwt_parts.next(), jwt_parts.next(), jwt_parts.next())
        else {
            return Err(JwtError::CouldNotDecompose("Missing token part".to_owned()));
        };

        let header_decoded = Base64UrlSafeNoPadding::decode_to_vec(header, None)
            .map_err(|e| JwtError::CouldNotDecompose(e.to_string()))?;

        let header_parsed: JWTHeader = serde_json::from_slice(&header_decoded)
            .map_err(|e| JwtError::CouldNotDecompose(e.to_string()))?;

        let payload_decoded = Base64UrlSafeNoPadding::decode_to_vec(payload, None)
            .map_err(|e| JwtError::CouldNotDecompose(e.to_string()))?;

        let payload_parsed: JWTPayload<Payload> = serde_json::from_slice(&payload_decoded)
            .map_err(|e| JwtError::CouldNotDecompose(e.to_string()))?;

        let signature = Base64UrlSafeNoPadding::decode_to_vec(signature, None)
            .map_err(|e| JwtError::CouldNotDecompose(e.to_string()))?;

        Ok(DecomposedToken {
            header: header_parsed,
            payload: payload_parsed,
            signing_input: format!("{header}.{payload}"),
            signature,
        })
    }
}
