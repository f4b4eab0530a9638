//! Wire format of the program's instruction data and of the treasury flag.
//!
//! Payload layout: `[tag: u8][arg0: u64 LE][arg1: u64 LE]...` with no padding
//! and no length prefixes. Tags are append-only.

use std::fmt;

use crate::constants::{ARG_LEN, INITIALIZED_FLAG, TAG_LEN};
use crate::errors::{ClientError, ClientResult};
use crate::state::RemoteAccount;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Mint = 0,
    Burn = 1,
    Diagnostic = 2,
    InitializeTreasury = 3,
    Transfer = 4,
    Stake = 5,
    Unstake = 6,
    PurchaseTicket = 7,
    RedeemTicket = 8,
    CreateTreasuryTokenAccount = 9,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Mint,
        Opcode::Burn,
        Opcode::Diagnostic,
        Opcode::InitializeTreasury,
        Opcode::Transfer,
        Opcode::Stake,
        Opcode::Unstake,
        Opcode::PurchaseTicket,
        Opcode::RedeemTicket,
        Opcode::CreateTreasuryTokenAccount,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Number of u64 arguments following the tag.
    pub fn arg_count(self) -> usize {
        match self {
            Opcode::Diagnostic | Opcode::InitializeTreasury | Opcode::CreateTreasuryTokenAccount => 0,
            Opcode::PurchaseTicket => 2,
            Opcode::Mint
            | Opcode::Burn
            | Opcode::Transfer
            | Opcode::Stake
            | Opcode::Unstake
            | Opcode::RedeemTicket => 1,
        }
    }

    pub fn payload_len(self) -> usize {
        TAG_LEN + ARG_LEN * self.arg_count()
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Mint => "mint",
            Opcode::Burn => "burn",
            Opcode::Diagnostic => "diagnostic",
            Opcode::InitializeTreasury => "initialize_treasury",
            Opcode::Transfer => "transfer",
            Opcode::Stake => "stake",
            Opcode::Unstake => "unstake",
            Opcode::PurchaseTicket => "purchase_ticket",
            Opcode::RedeemTicket => "redeem_ticket",
            Opcode::CreateTreasuryTokenAccount => "create_treasury_token_account",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.tag())
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ClientError;

    fn try_from(tag: u8) -> ClientResult<Self> {
        Opcode::ALL
            .get(tag as usize)
            .copied()
            .ok_or(ClientError::InvalidInstructionData)
    }
}

/// Typed instruction accepted by the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaprInstruction {
    Mint { amount: u64 },
    Burn { amount: u64 },
    Diagnostic,
    InitializeTreasury,
    Transfer { amount: u64 },
    Stake { amount: u64 },
    Unstake { amount: u64 },
    PurchaseTicket { amount: u64, vesting_seconds: u64 },
    RedeemTicket { amount: u64 },
    CreateTreasuryTokenAccount,
}

impl HaprInstruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            HaprInstruction::Mint { .. } => Opcode::Mint,
            HaprInstruction::Burn { .. } => Opcode::Burn,
            HaprInstruction::Diagnostic => Opcode::Diagnostic,
            HaprInstruction::InitializeTreasury => Opcode::InitializeTreasury,
            HaprInstruction::Transfer { .. } => Opcode::Transfer,
            HaprInstruction::Stake { .. } => Opcode::Stake,
            HaprInstruction::Unstake { .. } => Opcode::Unstake,
            HaprInstruction::PurchaseTicket { .. } => Opcode::PurchaseTicket,
            HaprInstruction::RedeemTicket { .. } => Opcode::RedeemTicket,
            HaprInstruction::CreateTreasuryTokenAccount => Opcode::CreateTreasuryTokenAccount,
        }
    }

    /// Arguments in wire order.
    pub fn args(&self) -> Vec<u64> {
        match *self {
            HaprInstruction::Mint { amount }
            | HaprInstruction::Burn { amount }
            | HaprInstruction::Transfer { amount }
            | HaprInstruction::Stake { amount }
            | HaprInstruction::Unstake { amount }
            | HaprInstruction::RedeemTicket { amount } => vec![amount],
            HaprInstruction::PurchaseTicket {
                amount,
                vesting_seconds,
            } => vec![amount, vesting_seconds],
            HaprInstruction::Diagnostic
            | HaprInstruction::InitializeTreasury
            | HaprInstruction::CreateTreasuryTokenAccount => Vec::new(),
        }
    }

    pub fn pack(&self) -> Vec<u8> {
        write_payload(self.opcode(), &self.args())
    }

    pub fn unpack(data: &[u8]) -> ClientResult<Self> {
        let (&tag, rest) = data.split_first().ok_or(ClientError::InvalidInstructionData)?;
        let opcode = Opcode::try_from(tag)?;
        if data.len() != opcode.payload_len() {
            return Err(ClientError::InvalidInstructionData);
        }

        let args: Vec<u64> = rest
            .chunks_exact(ARG_LEN)
            .map(|chunk| {
                let mut buf = [0u8; ARG_LEN];
                buf.copy_from_slice(chunk);
                u64::from_le_bytes(buf)
            })
            .collect();

        Ok(match opcode {
            Opcode::Mint => HaprInstruction::Mint { amount: args[0] },
            Opcode::Burn => HaprInstruction::Burn { amount: args[0] },
            Opcode::Diagnostic => HaprInstruction::Diagnostic,
            Opcode::InitializeTreasury => HaprInstruction::InitializeTreasury,
            Opcode::Transfer => HaprInstruction::Transfer { amount: args[0] },
            Opcode::Stake => HaprInstruction::Stake { amount: args[0] },
            Opcode::Unstake => HaprInstruction::Unstake { amount: args[0] },
            Opcode::PurchaseTicket => HaprInstruction::PurchaseTicket {
                amount: args[0],
                vesting_seconds: args[1],
            },
            Opcode::RedeemTicket => HaprInstruction::RedeemTicket { amount: args[0] },
            Opcode::CreateTreasuryTokenAccount => HaprInstruction::CreateTreasuryTokenAccount,
        })
    }
}

/// Encodes `opcode` with raw arguments, checking arity against the table.
pub fn encode(opcode: Opcode, args: &[u64]) -> ClientResult<Vec<u8>> {
    if args.len() != opcode.arg_count() {
        return Err(ClientError::ArgumentCount {
            opcode,
            expected: opcode.arg_count(),
            actual: args.len(),
        });
    }
    Ok(write_payload(opcode, args))
}

fn write_payload(opcode: Opcode, args: &[u64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(TAG_LEN + ARG_LEN * args.len());
    data.push(opcode.tag());
    for arg in args {
        data.extend_from_slice(&arg.to_le_bytes());
    }
    data
}

/// Byte 0 == 1 means initialized. Empty data is "not initialized".
pub fn decode_init_flag(data: &[u8]) -> bool {
    data.first() == Some(&INITIALIZED_FLAG)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    Absent,
    Uninitialized,
    Initialized,
}

impl AccountStatus {
    pub fn from_account(account: Option<&RemoteAccount>) -> Self {
        match account {
            None => AccountStatus::Absent,
            Some(account) if decode_init_flag(&account.data) => AccountStatus::Initialized,
            Some(_) => AccountStatus::Uninitialized,
        }
    }

    pub fn exists(self) -> bool {
        self != AccountStatus::Absent
    }

    pub fn is_initialized(self) -> bool {
        self == AccountStatus::Initialized
    }
}
