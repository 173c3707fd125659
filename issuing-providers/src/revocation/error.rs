use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum RevocationError {
    #[error("Failed to provision revocation list `{list_id}`: `{source}`")]
    ProvisioningFailed { list_id: u64, source: LedgerError },
    #[error("Ledger error: `{0}`")]
    LedgerError(#[from] LedgerError),
}
