//! Failures reported by ledger clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The operating wallet is unknown to the registry contract.
    #[error("Wallet not in registry")]
    WalletNotInRegistry,
    #[error("Ledger transport error: `{0}`")]
    Transport(#[from] anyhow::Error),
}
