// clients/hapr_client/src/instructions/treasury.rs
use anchor_lang::prelude::Pubkey;

use super::{OperationBuilder, OperationRequest};
use crate::codec::HaprInstruction;
use crate::contexts::{CreateTreasuryTokenAccount, Diagnostic, InitializeTreasury};
use crate::errors::ClientResult;

impl OperationBuilder {
    /// Opcode 3. Creates the treasury PDA and the mint PDA on the program side.
    pub fn initialize_treasury(&self, admin: &Pubkey) -> ClientResult<OperationRequest> {
        let accounts = InitializeTreasury {
            treasury: self.deriver.treasury()?.address,
            admin: *admin,
            mint: self.deriver.mint()?.address,
        };
        Ok(self.request(HaprInstruction::InitializeTreasury, &accounts))
    }

    /// Opcode 9. Asks the program to create the treasury's associated token
    /// account, signing for the treasury PDA itself.
    pub fn create_treasury_token_account(
        &self,
        admin: &Pubkey,
        treasury_token_account: &Pubkey,
    ) -> ClientResult<OperationRequest> {
        let accounts = CreateTreasuryTokenAccount {
            treasury: self.deriver.treasury()?.address,
            admin: *admin,
            mint: self.deriver.mint()?.address,
            treasury_token_account: *treasury_token_account,
        };
        Ok(self.request(HaprInstruction::CreateTreasuryTokenAccount, &accounts))
    }

    /// Opcode 2. The program logs its own view of the mint PDA.
    pub fn diagnostic(&self, payer: &Pubkey) -> OperationRequest {
        self.request(HaprInstruction::Diagnostic, &Diagnostic { payer: *payer })
    }
}
