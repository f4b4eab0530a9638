// Centralized Protocol Constants

// Seeds
// =====

/// Seed of the treasury PDA. The treasury is mint and burn authority.
pub const TREASURY_SEED: &[u8] = b"treasurythissuperhyperAPRtoken";

/// Seed of the mint PDA.
pub const MINT_SEED: &[u8] = b"mintthissuperhyperAPRtoken";

/// Per-owner staker PDA label. Derived as `[owner, STAKER_SEED]`.
pub const STAKER_SEED: &[u8] = b"staker";

/// Per-owner ticket PDA label. Derived as `[TICKET_SEED, owner]`.
pub const TICKET_SEED: &[u8] = b"ticket_seed";

// Account layouts
// ===============

/// Value of byte 0 of an initialized treasury account.
pub const INITIALIZED_FLAG: u8 = 1;

/// Initialization flag (1) + admin pubkey (32) + balance (8).
pub const TREASURY_ACCOUNT_SIZE: usize = 41;

/// amount_staked (8) + last_staked_time (8) + staking_duration (8) + owner (32).
pub const STAKER_ACCOUNT_SIZE: usize = 56;

// Instruction data
// ================

/// Size of the opcode tag at the start of every instruction payload.
pub const TAG_LEN: usize = 1;

/// Every instruction argument is a little-endian u64.
pub const ARG_LEN: usize = 8;
