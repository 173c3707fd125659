use ct_codecs::{Encoder, Hex};
use sha2::{Digest, Sha256};

use crate::{Hasher, HasherError};

pub struct SHA256 {}

impl Hasher for SHA256 {
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError> {
        Hex::encode_to_string(self.hash(input)?).map_err(|_| HasherError::CouldNotHash)
    }

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        Ok(hasher.finalize().to_vec())
    }
}
