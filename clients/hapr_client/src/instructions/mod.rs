use anchor_lang::prelude::{AccountMeta, Pubkey};
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::ToAccountMetas;

use crate::codec::{HaprInstruction, Opcode};
use crate::config::ProtocolConfig;
use crate::pda::AddressDeriver;

pub mod staking;
pub mod ticket;
pub mod token;
pub mod treasury;

/// One fully formed call into the program. Built per call and consumed by
/// submission; never cached.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationRequest {
    pub program_id: Pubkey,
    pub instruction: HaprInstruction,
    pub accounts: Vec<AccountMeta>,
}

impl OperationRequest {
    fn new(program_id: Pubkey, instruction: HaprInstruction, accounts: &impl ToAccountMetas) -> Self {
        Self {
            program_id,
            instruction,
            accounts: accounts.to_account_metas(None),
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.instruction.opcode()
    }

    pub fn data(&self) -> Vec<u8> {
        self.instruction.pack()
    }

    /// Signer keys in account order, deduplicated.
    pub fn signers(&self) -> Vec<Pubkey> {
        let mut signers: Vec<Pubkey> = Vec::new();
        for meta in self.accounts.iter().filter(|m| m.is_signer) {
            if !signers.contains(&meta.pubkey) {
                signers.push(meta.pubkey);
            }
        }
        signers
    }

    pub fn to_instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts.clone(),
            data: self.data(),
        }
    }
}

/// Builds one request per opcode. PDAs are derived here; token storage
/// addresses come from the caller.
#[derive(Clone, Copy, Debug)]
pub struct OperationBuilder {
    deriver: AddressDeriver,
}

impl OperationBuilder {
    pub fn new(config: ProtocolConfig) -> Self {
        Self {
            deriver: AddressDeriver::new(config),
        }
    }

    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    fn request(&self, instruction: HaprInstruction, accounts: &impl ToAccountMetas) -> OperationRequest {
        OperationRequest::new(*self.deriver.program_id(), instruction, accounts)
    }
}
