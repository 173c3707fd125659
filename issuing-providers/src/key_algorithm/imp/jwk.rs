use ct_codecs::{Base64UrlSafeNoPadding, Decoder, Encoder};

use crate::key_algorithm::{error::KeyAlgorithmError, model::PublicKeyJwk};

const COORDINATE_LEN: usize = 32;

/// Splits an uncompressed SEC1 point (`0x04 || x || y`) into an EC JWK.
pub(super) fn uncompressed_to_jwk(
    crv: &str,
    uncompressed: &[u8],
) -> Result<PublicKeyJwk, KeyAlgorithmError> {
    let (Some(0x04), true) = (
        uncompressed.first().copied(),
        uncompressed.len() == 1 + 2 * COORDINATE_LEN,
    ) else {
        return Err(KeyAlgorithmError::Failed(
            "expected uncompressed point".to_string(),
        ));
    };

    let (x, y) = uncompressed[1..].split_at(COORDINATE_LEN);
    Ok(PublicKeyJwk {
        kty: "EC".to_string(),
        crv: crv.to_string(),
        x: Base64UrlSafeNoPadding::encode_to_string(x)
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
        y: Base64UrlSafeNoPadding::encode_to_string(y)
            .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?,
        r#use: None,
    })
}

pub(super) fn jwk_to_uncompressed(
    crv: &str,
    jwk: &PublicKeyJwk,
) -> Result<Vec<u8>, KeyAlgorithmError> {
    if jwk.kty != "EC" || jwk.crv != crv {
        return Err(KeyAlgorithmError::Failed(format!(
            "unsupported key {}/{}",
            jwk.kty, jwk.crv
        )));
    }

    let x = Base64UrlSafeNoPadding::decode_to_vec(&jwk.x, None)
        .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;
    let y = Base64UrlSafeNoPadding::decode_to_vec(&jwk.y, None)
        .map_err(|e| KeyAlgorithmError::Failed(e.to_string()))?;

    if x.len() != COORDINATE_LEN || y.len() != COORDINATE_LEN {
        return Err(KeyAlgorithmError::Failed(
            "invalid coordinate length".to_string(),
        ));
    }

    Ok([&[0x04], x.as_slice(), y.as_slice()].concat())
}
