use anchor_lang::prelude::Pubkey;

use crate::constants::*;

/// Seed bytes for every label the program derives addresses from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedSet {
    pub treasury: &'static [u8],
    pub mint: &'static [u8],
    pub staker: &'static [u8],
    pub ticket: &'static [u8],
}

impl Default for SeedSet {
    fn default() -> Self {
        Self {
            treasury: TREASURY_SEED,
            mint: MINT_SEED,
            staker: STAKER_SEED,
            ticket: TICKET_SEED,
        }
    }
}

/// Immutable description of one deployed protocol instance.
///
/// Every component takes its own copy, so several instances can be driven
/// from one process without sharing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub program_id: Pubkey,
    pub seeds: SeedSet,

    /// Check that the mint PDA is owned by the SPL Token program before any
    /// operation that references it.
    pub verify_mint_owner: bool,

    /// Check that token storage handed to an operation is owned by the SPL
    /// Token program, whether it was found by get-or-create or supplied by
    /// the caller.
    pub verify_storage_owner: bool,
}

impl ProtocolConfig {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            seeds: SeedSet::default(),
            verify_mint_owner: true,
            verify_storage_owner: true,
        }
    }

    pub fn with_seeds(mut self, seeds: SeedSet) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_mint_owner_check(mut self, enabled: bool) -> Self {
        self.verify_mint_owner = enabled;
        self
    }

    pub fn with_storage_owner_check(mut self, enabled: bool) -> Self {
        self.verify_storage_owner = enabled;
        self
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::new(crate::ID)
    }
}
