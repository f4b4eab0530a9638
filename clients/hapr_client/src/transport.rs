//! Collaborators the driver depends on. Implementations wrap an RPC client,
//! a wallet, and the SPL associated-token helper; none of that lives here.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use async_trait::async_trait;

use crate::errors::TransportError;
use crate::state::{RemoteAccount, StorageOutcome, TransactionId};

#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// `Ok(None)` when the account does not exist.
    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<RemoteAccount>, TransportError>;
}

#[async_trait]
pub trait AssociatedStorage: Send + Sync {
    /// Returns the associated token account of `owner` for `mint`, creating
    /// it when absent. `allow_off_curve_owner` must be set for PDA owners.
    async fn get_or_create(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
        allow_off_curve_owner: bool,
    ) -> Result<StorageOutcome, TransportError>;
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Signs with the keys behind `signers` and sends one transaction.
    async fn submit(&self, instructions: &[Instruction], signers: &[Pubkey]) -> Result<TransactionId, TransportError>;
}
