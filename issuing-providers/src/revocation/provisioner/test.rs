use std::sync::Arc;

use mockall::{predicate::eq, Sequence};
use uuid::Uuid;

use super::RevocationListProvisioner;
use crate::{
    allocation::model::AllocationListEntry,
    common_models::{did::DidValue, issuer::Issuer},
    ledger::LedgerError,
    revocation::{
        error::RevocationError, MockRevocationLedger, MockRevocationLedgerProvider,
        RevocationLedger,
    },
};

fn issuer() -> Issuer {
    Issuer {
        tenant_id: "tenant-1".to_string().into(),
        did: "did:ion:issuer".to_string().into(),
        dlt_primary_address: "0xPRIMARY".to_string(),
        dlt_operator_address: Some("0xOPERATOR".to_string()),
        dlt_operator_key_id: Uuid::new_v4().into(),
        issuing_service_key_id: Uuid::new_v4().into(),
        issuing_service_did_key_id: "key-2".to_string(),
    }
}

fn cao_did() -> DidValue {
    "did:ion:cao".to_string().into()
}

fn entry(list_id: u64, index: u64, is_new_list: bool) -> AllocationListEntry {
    AllocationListEntry {
        list_id,
        index,
        is_new_list,
    }
}

fn provisioner(ledger: MockRevocationLedger) -> RevocationListProvisioner {
    let ledger: Arc<dyn RevocationLedger> = Arc::new(ledger);
    let mut provider = MockRevocationLedgerProvider::new();
    provider
        .expect_connect()
        .once()
        .returning(move |_| Ok(ledger.clone()));

    RevocationListProvisioner::new(Arc::new(provider), cao_did())
}

#[tokio::test]
async fn test_provision_new_lists_once_per_list() {
    let mut ledger = MockRevocationLedger::new();
    ledger
        .expect_add_revocation_list_signed()
        .with(eq(7), eq(cao_did()))
        .once()
        .returning(|_, _| Ok(()));
    ledger
        .expect_add_revocation_list_signed()
        .with(eq(8), eq(cao_did()))
        .once()
        .returning(|_, _| Ok(()));

    let provisioned = provisioner(ledger)
        .provision_new_lists(
            &issuer(),
            &[
                entry(7, 1, true),
                entry(7, 1, true),
                entry(5, 4, false),
                entry(8, 1, true),
            ],
        )
        .await
        .unwrap();

    assert_eq!(provisioned, vec![7, 8]);
}

#[tokio::test]
async fn test_no_new_lists_skips_ledger() {
    let mut provider = MockRevocationLedgerProvider::new();
    provider.expect_connect().never();

    let provisioner = RevocationListProvisioner::new(Arc::new(provider), cao_did());
    let provisioned = provisioner
        .provision_new_lists(&issuer(), &[entry(5, 4, false), entry(5, 3, false)])
        .await
        .unwrap();

    assert!(provisioned.is_empty());
}

#[tokio::test]
async fn test_unregistered_wallet_is_added_then_retried() {
    let mut seq = Sequence::new();
    let mut ledger = MockRevocationLedger::new();
    ledger
        .expect_add_revocation_list_signed()
        .once()
        .in_sequence(&mut seq)
        .returning(|_, _| Err(LedgerError::WalletNotInRegistry));
    ledger
        .expect_add_wallet_to_registry_signed()
        .with(eq(cao_did()))
        .once()
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    ledger
        .expect_add_revocation_list_signed()
        .with(eq(7), eq(cao_did()))
        .once()
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    provisioner(ledger)
        .provision_new_lists(&issuer(), &[entry(7, 1, true)])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_retry_is_attempted_only_once() {
    let mut ledger = MockRevocationLedger::new();
    ledger
        .expect_add_revocation_list_signed()
        .times(2)
        .returning(|_, _| Err(LedgerError::WalletNotInRegistry));
    ledger
        .expect_add_wallet_to_registry_signed()
        .once()
        .returning(|_| Ok(()));

    let result = provisioner(ledger)
        .provision_new_lists(&issuer(), &[entry(7, 1, true)])
        .await;

    assert!(matches!(
        result,
        Err(RevocationError::ProvisioningFailed {
            list_id: 7,
            source: LedgerError::WalletNotInRegistry
        })
    ));
}

#[tokio::test]
async fn test_other_failures_propagate() {
    let mut ledger = MockRevocationLedger::new();
    ledger
        .expect_add_revocation_list_signed()
        .once()
        .returning(|_, _| Err(LedgerError::Transport(anyhow::anyhow!("nonce too low"))));
    ledger.expect_add_wallet_to_registry_signed().never();

    let result = provisioner(ledger)
        .provision_new_lists(&issuer(), &[entry(7, 1, true)])
        .await;

    assert!(matches!(
        result,
        Err(RevocationError::ProvisioningFailed {
            list_id: 7,
            source: LedgerError::Transport(_)
        })
    ));
}
