use std::sync::Arc;

use futures::future::try_join_all;
use itertools::Itertools;

use super::{error::RevocationError, RevocationLedger, RevocationLedgerProvider};
use crate::{
    allocation::model::AllocationListEntry,
    common_models::{did::DidValue, issuer::Issuer},
    ledger::LedgerError,
};

#[cfg(test)]
mod test;

pub struct RevocationListProvisioner {
    ledger_provider: Arc<dyn RevocationLedgerProvider>,
    cao_did: DidValue,
}

impl RevocationListProvisioner {
    pub fn new(ledger_provider: Arc<dyn RevocationLedgerProvider>, cao_did: DidValue) -> Self {
        Self {
            ledger_provider,
            cao_did,
        }
    }

    /// Registers every list flagged as new among `entries`, once per list id,
    /// concurrently. Returns the provisioned list ids.
    pub async fn provision_new_lists(
        &self,
        issuer: &Issuer,
        entries: &[AllocationListEntry],
    ) -> Result<Vec<u64>, RevocationError> {
        let list_ids: Vec<u64> = entries
            .iter()
            .filter(|entry| entry.is_new_list)
            .map(|entry| entry.list_id)
            .unique()
            .collect();

        if list_ids.is_empty() {
            return Ok(list_ids);
        }

        let ledger = self.ledger_provider.connect(issuer).await?;

        try_join_all(
            list_ids
                .iter()
                .map(|list_id| self.provision_list(ledger.as_ref(), *list_id)),
        )
        .await?;

        Ok(list_ids)
    }

    /// Registers one list. An unregistered operator wallet is added to the
    /// registry first and the registration is retried once.
    pub async fn provision_list(
        &self,
        ledger: &dyn RevocationLedger,
        list_id: u64,
    ) -> Result<(), RevocationError> {
        match ledger
            .add_revocation_list_signed(list_id, &self.cao_did)
            .await
        {
            Ok(()) => {}
            Err(LedgerError::WalletNotInRegistry) => {
                tracing::warn!(list_id, cao_did = %self.cao_did, "wallet not in registry, registering");

                ledger.add_wallet_to_registry_signed(&self.cao_did).await?;
                ledger
                    .add_revocation_list_signed(list_id, &self.cao_did)
                    .await
                    .map_err(|source| RevocationError::ProvisioningFailed { list_id, source })?;
            }
            Err(source) => return Err(RevocationError::ProvisioningFailed { list_id, source }),
        }

        tracing::info!(list_id, "revocation list provisioned");
        Ok(())
    }
}
