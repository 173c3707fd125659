//! `struct`s for the KMS.

use zeroize::Zeroizing;

#[derive(Clone, Debug)]
pub struct ExportedKey {
    pub key_type: String,
    pub private_key: Zeroizing<Vec<u8>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignJwtHeader {
    pub key_id: Option<String>,
}
