use std::fmt;

use anchor_lang::prelude::*;

use crate::constants::{INITIALIZED_FLAG, TREASURY_ACCOUNT_SIZE};

/// Raw account as returned by the lookup collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl RemoteAccount {
    pub fn new(owner: Pubkey, data: Vec<u8>) -> Self {
        Self { owner, data }
    }
}

/// Result of get-or-create on an associated token account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageOutcome {
    Found(Pubkey),
    Created(Pubkey),
}

impl StorageOutcome {
    pub fn address(&self) -> Pubkey {
        match *self {
            StorageOutcome::Found(address) | StorageOutcome::Created(address) => address,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, StorageOutcome::Created(_))
    }
}

/// Identifier returned by the submission collaborator (base58 signature).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId(pub String);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// -------------------------
// Program account views
// -------------------------

/// Treasury PDA layout: `[flag: u8][admin: Pubkey][balance: u64 LE]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasuryState {
    pub is_initialized: bool,
    pub admin: Pubkey,
    pub balance: u64,
}

impl TreasuryState {
    pub fn unpack(data: &[u8]) -> Option<Self> {
        if data.len() < TREASURY_ACCOUNT_SIZE {
            return None;
        }
        let admin = Pubkey::try_from(&data[1..33]).ok()?;
        let balance = u64::from_le_bytes(data[33..41].try_into().ok()?);

        Some(Self {
            is_initialized: data[0] == INITIALIZED_FLAG,
            admin,
            balance,
        })
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakerState {
    pub amount_staked: u64,
    pub last_staked_time: i64,
    pub staking_duration: i64,
    pub owner: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub number_of_tickets: u64,
    pub deposit_time: i64,
    pub vesting_period: i64,
    pub claimed: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TicketBook {
    pub owner: Pubkey,
    pub tickets: Vec<Ticket>,
    pub ticket_total: u64,
}

impl TicketBook {
    pub fn unclaimed(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| !t.claimed)
    }
}

/// Borsh-decodes the written prefix of an account. The program allocates
/// more space than it writes, so trailing bytes are ignored.
pub fn decode_prefix<T: AnchorDeserialize>(data: &[u8]) -> Option<T> {
    let mut cursor = data;
    T::deserialize(&mut cursor).ok()
}
