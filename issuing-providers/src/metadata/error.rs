use thiserror::Error;

use crate::{kms::error::KmsError, ledger::LedgerError};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Ledger error: `{0}`")]
    LedgerError(#[from] LedgerError),
    #[error("KMS error: `{0}`")]
    KmsError(#[from] KmsError),
}
