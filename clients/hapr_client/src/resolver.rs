use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use log::debug;

use crate::codec::AccountStatus;
use crate::config::ProtocolConfig;
use crate::constants::STAKER_ACCOUNT_SIZE;
use crate::errors::{ClientError, ClientResult};
use crate::pda::AddressDeriver;
use crate::state::{decode_prefix, RemoteAccount, StakerState, TicketBook, TreasuryState};
use crate::transport::AccountLookup;

/// Read-side queries. Every call performs exactly one remote read; nothing
/// is cached, so two calls may observe different states.
#[derive(Clone)]
pub struct AccountResolver {
    deriver: AddressDeriver,
    lookup: Arc<dyn AccountLookup>,
}

impl AccountResolver {
    pub fn new(config: ProtocolConfig, lookup: Arc<dyn AccountLookup>) -> Self {
        Self {
            deriver: AddressDeriver::new(config),
            lookup,
        }
    }

    async fn fetch(&self, operation: &'static str, address: &Pubkey) -> ClientResult<Option<RemoteAccount>> {
        self.lookup
            .get_account_info(address)
            .await
            .map_err(|e| ClientError::transport(operation, *address, e))
    }

    pub async fn exists(&self, address: &Pubkey) -> ClientResult<bool> {
        Ok(self.fetch("exists", address).await?.is_some())
    }

    pub async fn status(&self, address: &Pubkey) -> ClientResult<AccountStatus> {
        let account = self.fetch("status", address).await?;
        Ok(AccountStatus::from_account(account.as_ref()))
    }

    pub async fn is_initialized(&self) -> ClientResult<bool> {
        let treasury = self.deriver.treasury()?.address;
        let account = self.fetch("is_initialized", &treasury).await?;
        let status = AccountStatus::from_account(account.as_ref());
        debug!("treasury {treasury} status: {status:?}");
        Ok(status.is_initialized())
    }

    /// Fails unless `address` exists and is owned by `expected_owner`.
    pub async fn require_owner(
        &self,
        operation: &'static str,
        address: &Pubkey,
        expected_owner: &Pubkey,
    ) -> ClientResult<RemoteAccount> {
        let account = self
            .fetch(operation, address)
            .await?
            .ok_or(ClientError::AccountMissing {
                operation,
                address: *address,
            })?;

        if account.owner != *expected_owner {
            return Err(ClientError::OwnershipMismatch {
                operation,
                address: *address,
                expected: *expected_owner,
                actual: account.owner,
            });
        }
        Ok(account)
    }

    /// `Ok(None)` when the treasury is absent or has never been written.
    pub async fn treasury_state(&self) -> ClientResult<Option<TreasuryState>> {
        let treasury = self.deriver.treasury()?.address;
        match self.fetch_owned("treasury_state", &treasury).await? {
            None => Ok(None),
            Some(account) if account.data.is_empty() => Ok(None),
            Some(account) => TreasuryState::unpack(&account.data)
                .map(Some)
                .ok_or(ClientError::InvalidAccountData { address: treasury }),
        }
    }

    pub async fn staker_state(&self, owner: &Pubkey) -> ClientResult<Option<StakerState>> {
        let staker = self.deriver.staker(owner)?.address;
        let Some(account) = self.fetch_owned("staker_state", &staker).await? else {
            return Ok(None);
        };
        if account.data.len() < STAKER_ACCOUNT_SIZE {
            return Err(ClientError::InvalidAccountData { address: staker });
        }
        decode_prefix(&account.data)
            .map(Some)
            .ok_or(ClientError::InvalidAccountData { address: staker })
    }

    pub async fn ticket_book(&self, owner: &Pubkey) -> ClientResult<Option<TicketBook>> {
        let ticket = self.deriver.ticket(owner)?.address;
        let Some(account) = self.fetch_owned("ticket_book", &ticket).await? else {
            return Ok(None);
        };
        decode_prefix(&account.data)
            .map(Some)
            .ok_or(ClientError::InvalidAccountData { address: ticket })
    }

    /// Reads an account that must belong to the program. Anything owned
    /// elsewhere is rejected.
    async fn fetch_owned(&self, operation: &'static str, address: &Pubkey) -> ClientResult<Option<RemoteAccount>> {
        let Some(account) = self.fetch(operation, address).await? else {
            return Ok(None);
        };

        let program_id = *self.deriver.program_id();
        if account.owner != program_id {
            return Err(ClientError::OwnershipMismatch {
                operation,
                address: *address,
                expected: program_id,
                actual: account.owner,
            });
        }
        Ok(Some(account))
    }
}
