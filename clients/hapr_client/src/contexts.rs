// clients/hapr_client/src/contexts.rs
//
// Account lists per instruction. Field order is the order the program pulls
// accounts off its iterator; reordering any of them breaks the call.

use anchor_lang::prelude::{AccountMeta, Pubkey};
use anchor_lang::solana_program::{system_program, sysvar};
use anchor_lang::ToAccountMetas;
use anchor_spl::{associated_token, token};

fn writable(pubkey: Pubkey, is_signer: bool) -> AccountMeta {
    AccountMeta::new(pubkey, is_signer)
}

fn readonly(pubkey: Pubkey, is_signer: bool) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, is_signer)
}

/// Opcode 0.
#[derive(Clone, Copy, Debug)]
pub struct MintTokens {
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub recipient_token_account: Pubkey,
    /// Mint authority; the program signs for it.
    pub treasury: Pubkey,
}

impl ToAccountMetas for MintTokens {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.payer, true),
            writable(self.mint, false),
            writable(self.recipient_token_account, false),
            readonly(self.treasury, false),
            readonly(system_program::ID, false),
            readonly(token::ID, false),
        ]
    }
}

/// Opcode 1.
#[derive(Clone, Copy, Debug)]
pub struct BurnTokens {
    pub payer: Pubkey,
    pub burn_token_account: Pubkey,
    pub mint: Pubkey,
    pub treasury: Pubkey,
}

impl ToAccountMetas for BurnTokens {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.payer, true),
            writable(self.burn_token_account, false),
            writable(self.mint, false),
            readonly(self.treasury, false),
            readonly(system_program::ID, false),
            readonly(token::ID, false),
            readonly(sysvar::rent::ID, false),
        ]
    }
}

/// Opcode 2. The program ignores the accounts but expects three of them.
#[derive(Clone, Copy, Debug)]
pub struct Diagnostic {
    pub payer: Pubkey,
}

impl ToAccountMetas for Diagnostic {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            readonly(self.payer, true),
            readonly(self.payer, false),
            readonly(self.payer, true),
        ]
    }
}

/// Opcode 3.
#[derive(Clone, Copy, Debug)]
pub struct InitializeTreasury {
    pub treasury: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
}

impl ToAccountMetas for InitializeTreasury {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.treasury, false),
            readonly(self.admin, true),
            writable(self.mint, false),
            readonly(system_program::ID, false),
            readonly(token::ID, false),
            readonly(sysvar::rent::ID, false),
        ]
    }
}

/// Opcode 4. Sender storage precedes recipient storage.
#[derive(Clone, Copy, Debug)]
pub struct TransferTokens {
    pub sender_token_account: Pubkey,
    pub recipient_token_account: Pubkey,
    pub mint: Pubkey,
    pub sender: Pubkey,
}

impl ToAccountMetas for TransferTokens {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.sender_token_account, false),
            writable(self.recipient_token_account, false),
            readonly(self.mint, false),
            readonly(self.sender, true),
            readonly(system_program::ID, false),
            readonly(token::ID, false),
        ]
    }
}

/// Opcode 5. The staker PDA goes last; the program creates it on first stake.
#[derive(Clone, Copy, Debug)]
pub struct StakeTokens {
    pub user_token_account: Pubkey,
    pub treasury_token_account: Pubkey,
    pub treasury: Pubkey,
    pub user: Pubkey,
    pub staker: Pubkey,
}

impl ToAccountMetas for StakeTokens {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.user_token_account, false),
            writable(self.treasury_token_account, false),
            readonly(self.treasury, false),
            readonly(self.user, true),
            readonly(token::ID, false),
            readonly(system_program::ID, false),
            writable(self.staker, false),
        ]
    }
}

/// Opcode 6.
#[derive(Clone, Copy, Debug)]
pub struct UnstakeTokens {
    pub user: Pubkey,
    pub staker: Pubkey,
    pub user_token_account: Pubkey,
    pub treasury_token_account: Pubkey,
    pub treasury: Pubkey,
}

impl ToAccountMetas for UnstakeTokens {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            readonly(self.user, true),
            writable(self.staker, false),
            writable(self.user_token_account, false),
            writable(self.treasury_token_account, false),
            readonly(self.treasury, false),
            readonly(token::ID, false),
        ]
    }
}

/// Opcode 7.
#[derive(Clone, Copy, Debug)]
pub struct PurchaseTicket {
    pub buyer: Pubkey,
    pub buyer_token_account: Pubkey,
    pub treasury_token_account: Pubkey,
    pub ticket: Pubkey,
}

impl ToAccountMetas for PurchaseTicket {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            readonly(self.buyer, true),
            writable(self.buyer_token_account, false),
            writable(self.treasury_token_account, false),
            writable(self.ticket, false),
            readonly(token::ID, false),
            readonly(system_program::ID, false),
        ]
    }
}

/// Opcode 8.
#[derive(Clone, Copy, Debug)]
pub struct RedeemTicket {
    pub ticket: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub owner_token_account: Pubkey,
    pub treasury: Pubkey,
}

impl ToAccountMetas for RedeemTicket {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            writable(self.ticket, false),
            readonly(self.owner, true),
            readonly(self.mint, false),
            writable(self.owner_token_account, false),
            readonly(self.treasury, false),
            readonly(token::ID, false),
        ]
    }
}

/// Opcode 9. The admin pays for the associated token account.
#[derive(Clone, Copy, Debug)]
pub struct CreateTreasuryTokenAccount {
    pub treasury: Pubkey,
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub treasury_token_account: Pubkey,
}

impl ToAccountMetas for CreateTreasuryTokenAccount {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            readonly(self.treasury, false),
            writable(self.admin, true),
            readonly(self.mint, false),
            readonly(system_program::ID, false),
            readonly(token::ID, false),
            readonly(sysvar::rent::ID, false),
            writable(self.treasury_token_account, false),
            readonly(associated_token::ID, false),
        ]
    }
}
