// clients/hapr_client/src/driver.rs
use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use anchor_spl::token;
use log::{debug, info, warn};

use crate::config::ProtocolConfig;
use crate::errors::{ClientError, ClientResult};
use crate::instructions::{OperationBuilder, OperationRequest};
use crate::pda::{associated_storage_address, AddressDeriver};
use crate::resolver::AccountResolver;
use crate::state::{StorageOutcome, TransactionId};
use crate::transport::{AccountLookup, AssociatedStorage, TransactionSubmitter};

/// Progress of one treasury bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitState {
    Unchecked,
    NotInitialized,
    Initializing,
    Initialized,
    AlreadyInitialized,
}

impl InitState {
    pub fn can_advance_to(self, next: InitState) -> bool {
        matches!(
            (self, next),
            (InitState::Unchecked, InitState::NotInitialized)
                | (InitState::Unchecked, InitState::AlreadyInitialized)
                | (InitState::NotInitialized, InitState::Initializing)
                | (InitState::Initializing, InitState::Initialized)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InitState::Initialized | InitState::AlreadyInitialized)
    }

    fn advance(self, next: InitState) -> InitState {
        debug_assert!(self.can_advance_to(next), "illegal transition {self:?} -> {next:?}");
        debug!("treasury init: {self:?} -> {next:?}");
        next
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// The treasury was already initialized; nothing was submitted.
    AlreadyInitialized,
    Initialized(TransactionId),
}

impl InitOutcome {
    pub fn state(&self) -> InitState {
        match self {
            InitOutcome::AlreadyInitialized => InitState::AlreadyInitialized,
            InitOutcome::Initialized(_) => InitState::Initialized,
        }
    }

    pub fn transaction(&self) -> Option<&TransactionId> {
        match self {
            InitOutcome::AlreadyInitialized => None,
            InitOutcome::Initialized(tx) => Some(tx),
        }
    }
}

/// Bootstrap result. The treasury storage step is independent of the init
/// step and its failure is kept here rather than failing the bootstrap.
#[derive(Debug)]
pub struct BootstrapReport {
    pub init: InitOutcome,
    pub treasury_storage: ClientResult<StorageOutcome>,
}

/// Sequences derive, resolve, build and submit for every operation.
/// Holds no state between calls.
#[derive(Clone)]
pub struct SubmissionDriver {
    config: ProtocolConfig,
    payer: Pubkey,
    resolver: AccountResolver,
    builder: OperationBuilder,
    storage: Arc<dyn AssociatedStorage>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl SubmissionDriver {
    pub fn new(
        config: ProtocolConfig,
        payer: Pubkey,
        lookup: Arc<dyn AccountLookup>,
        storage: Arc<dyn AssociatedStorage>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            config,
            payer,
            resolver: AccountResolver::new(config, lookup),
            builder: OperationBuilder::new(config),
            storage,
            submitter,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    pub fn resolver(&self) -> &AccountResolver {
        &self.resolver
    }

    pub fn builder(&self) -> &OperationBuilder {
        &self.builder
    }

    fn deriver(&self) -> &AddressDeriver {
        self.builder.deriver()
    }

    // ---------------------------------------------------------------------
    // Bootstrap
    // ---------------------------------------------------------------------

    /// Submits opcode 3 only when the treasury is not initialized yet.
    pub async fn initialize_treasury(&self) -> ClientResult<InitOutcome> {
        let state = InitState::Unchecked;

        if self.resolver.is_initialized().await? {
            state.advance(InitState::AlreadyInitialized);
            info!("treasury already initialized, skipping init");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let state = state.advance(InitState::NotInitialized);
        let treasury = self.deriver().treasury()?.address;
        let request = self.builder.initialize_treasury(&self.payer)?;
        let state = state.advance(InitState::Initializing);
        let tx = self.submit("initialize_treasury", &treasury, &request).await?;
        state.advance(InitState::Initialized);

        info!("treasury initialized: {tx}");
        Ok(InitOutcome::Initialized(tx))
    }

    /// Get-or-create of the treasury's associated token account. The
    /// treasury is a PDA, so its owner is off-curve.
    pub async fn ensure_treasury_token_account(&self) -> ClientResult<StorageOutcome> {
        let treasury = self.deriver().treasury()?.address;
        self.storage_for("treasury_storage", &treasury, true).await
    }

    pub async fn bootstrap(&self) -> ClientResult<BootstrapReport> {
        let init = self.initialize_treasury().await?;

        let treasury_storage = self.ensure_treasury_token_account().await;
        if let Err(e) = &treasury_storage {
            warn!("treasury storage step failed after init: {e}");
        }

        Ok(BootstrapReport {
            init,
            treasury_storage,
        })
    }

    // ---------------------------------------------------------------------
    // Steady state
    // ---------------------------------------------------------------------

    /// The mint PDA must exist and be owned by the SPL Token program.
    pub async fn verify_mint(&self) -> ClientResult<()> {
        self.check_mint("verify_mint").await
    }

    /// Mints to `recipient_token_account`, or to the payer's own storage
    /// when none is given. An explicit recipient goes through the same
    /// owner check as resolved storage.
    pub async fn mint(&self, amount: u64, recipient_token_account: Option<Pubkey>) -> ClientResult<TransactionId> {
        self.guard_mint("mint").await?;
        let recipient = match recipient_token_account {
            Some(account) => {
                self.guard_storage("mint", &account).await?;
                account
            }
            None => self.storage_for("mint", &self.payer, false).await?.address(),
        };
        let treasury = self.deriver().treasury()?.address;
        let request = self.builder.mint(&self.payer, &recipient, amount)?;
        self.submit("mint", &treasury, &request).await
    }

    pub async fn burn(&self, amount: u64) -> ClientResult<TransactionId> {
        self.guard_mint("burn").await?;
        let storage = self.storage_for("burn", &self.payer, false).await?;
        let treasury = self.deriver().treasury()?.address;
        let request = self.builder.burn(&self.payer, &storage.address(), amount)?;
        self.submit("burn", &treasury, &request).await
    }

    /// Moves `amount` from the payer's storage to `recipient_owner`'s,
    /// creating the recipient's storage if needed.
    pub async fn transfer(&self, amount: u64, recipient_owner: &Pubkey) -> ClientResult<TransactionId> {
        self.guard_mint("transfer").await?;
        let sender = self.storage_for("transfer", &self.payer, false).await?;
        let recipient = self.storage_for("transfer", recipient_owner, false).await?;
        let request = self
            .builder
            .transfer(&self.payer, &sender.address(), &recipient.address(), amount)?;
        let mint = self.deriver().mint()?.address;
        self.submit("transfer", &mint, &request).await
    }

    pub async fn stake(&self, amount: u64) -> ClientResult<TransactionId> {
        let (user, treasury) = self.user_and_treasury_storage("stake").await?;
        let staker = self.deriver().staker(&self.payer)?.address;
        let request = self.builder.stake(&self.payer, &user, &treasury, amount)?;
        self.submit("stake", &staker, &request).await
    }

    pub async fn unstake(&self, amount: u64) -> ClientResult<TransactionId> {
        let (user, treasury) = self.user_and_treasury_storage("unstake").await?;
        let staker = self.deriver().staker(&self.payer)?.address;
        let request = self.builder.unstake(&self.payer, &user, &treasury, amount)?;
        self.submit("unstake", &staker, &request).await
    }

    pub async fn purchase_ticket(&self, amount: u64, vesting_seconds: u64) -> ClientResult<TransactionId> {
        let (buyer, treasury) = self.user_and_treasury_storage("purchase_ticket").await?;
        let ticket = self.deriver().ticket(&self.payer)?.address;
        let request = self
            .builder
            .purchase_ticket(&self.payer, &buyer, &treasury, amount, vesting_seconds)?;
        self.submit("purchase_ticket", &ticket, &request).await
    }

    pub async fn redeem_ticket(&self, amount: u64) -> ClientResult<TransactionId> {
        self.guard_mint("redeem_ticket").await?;
        let storage = self.storage_for("redeem_ticket", &self.payer, false).await?;
        let ticket = self.deriver().ticket(&self.payer)?.address;
        let request = self.builder.redeem_ticket(&self.payer, &storage.address(), amount)?;
        self.submit("redeem_ticket", &ticket, &request).await
    }

    /// Errors are attributed to the mint PDA, the address the program
    /// reports on.
    pub async fn run_diagnostic(&self) -> ClientResult<TransactionId> {
        let mint = self.deriver().mint()?.address;
        let request = self.builder.diagnostic(&self.payer);
        self.submit("diagnostic", &mint, &request).await
    }

    /// Opcode 9: the program creates the treasury's token account itself.
    /// The address is computed locally; no storage collaborator is involved.
    pub async fn create_treasury_token_account(&self) -> ClientResult<TransactionId> {
        let treasury = self.deriver().treasury()?.address;
        let mint = self.deriver().mint()?.address;
        let ata = associated_storage_address(&mint, &treasury);
        let request = self.builder.create_treasury_token_account(&self.payer, &ata)?;
        self.submit("create_treasury_token_account", &treasury, &request).await
    }

    // ---------------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------------

    async fn check_mint(&self, operation: &'static str) -> ClientResult<()> {
        let mint = self.deriver().mint()?.address;
        self.resolver.require_owner(operation, &mint, &token::ID).await?;
        Ok(())
    }

    async fn guard_mint(&self, operation: &'static str) -> ClientResult<()> {
        if self.config.verify_mint_owner {
            self.check_mint(operation).await?;
        }
        Ok(())
    }

    async fn guard_storage(&self, operation: &'static str, address: &Pubkey) -> ClientResult<()> {
        if self.config.verify_storage_owner {
            self.resolver.require_owner(operation, address, &token::ID).await?;
        }
        Ok(())
    }

    /// Get-or-create of `owner`'s storage. Storage that already existed is
    /// owner-checked before use; freshly created storage is not re-read.
    async fn storage_for(
        &self,
        operation: &'static str,
        owner: &Pubkey,
        allow_off_curve_owner: bool,
    ) -> ClientResult<StorageOutcome> {
        let mint = self.deriver().mint()?.address;
        let outcome = self
            .storage
            .get_or_create(&mint, owner, allow_off_curve_owner)
            .await
            .map_err(|e| ClientError::transport(operation, *owner, e))?;

        match outcome {
            StorageOutcome::Found(address) => {
                debug!("{operation}: storage {address} found for {owner}");
                self.guard_storage(operation, &address).await?;
            }
            StorageOutcome::Created(address) => info!("{operation}: created storage {address} for {owner}"),
        }
        Ok(outcome)
    }

    async fn user_and_treasury_storage(&self, operation: &'static str) -> ClientResult<(Pubkey, Pubkey)> {
        let treasury = self.deriver().treasury()?.address;
        let user = self.storage_for(operation, &self.payer, false).await?;
        let treasury = self.storage_for(operation, &treasury, true).await?;
        Ok((user.address(), treasury.address()))
    }

    /// `target` is the derived address a failure is reported against.
    async fn submit(
        &self,
        operation: &'static str,
        target: &Pubkey,
        request: &OperationRequest,
    ) -> ClientResult<TransactionId> {
        let instruction = request.to_instruction();
        let signers = request.signers();
        debug!(
            "{operation}: submitting {} with {} account(s)",
            request.opcode(),
            instruction.accounts.len()
        );

        let tx = self
            .submitter
            .submit(&[instruction], &signers)
            .await
            .map_err(|e| ClientError::transport(operation, *target, e))?;
        info!("{operation}: {tx}");
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_transitions() {
        use InitState::*;

        assert!(Unchecked.can_advance_to(NotInitialized));
        assert!(Unchecked.can_advance_to(AlreadyInitialized));
        assert!(NotInitialized.can_advance_to(Initializing));
        assert!(Initializing.can_advance_to(Initialized));

        assert!(!Unchecked.can_advance_to(Initializing));
        assert!(!NotInitialized.can_advance_to(AlreadyInitialized));
        assert!(!Initialized.can_advance_to(Initializing));
        assert!(!AlreadyInitialized.can_advance_to(NotInitialized));
    }

    #[test]
    fn only_end_states_are_terminal() {
        assert!(InitState::Initialized.is_terminal());
        assert!(InitState::AlreadyInitialized.is_terminal());
        assert!(!InitState::Initializing.is_terminal());
        assert!(!InitState::Unchecked.is_terminal());
    }

    #[test]
    fn outcome_maps_to_state() {
        let tx = TransactionId::from("5xYz".to_string());
        let done = InitOutcome::Initialized(tx.clone());
        assert_eq!(done.state(), InitState::Initialized);
        assert_eq!(done.transaction(), Some(&tx));
        assert_eq!(InitOutcome::AlreadyInitialized.state(), InitState::AlreadyInitialized);
        assert_eq!(InitOutcome::AlreadyInitialized.transaction(), None);
    }
}
