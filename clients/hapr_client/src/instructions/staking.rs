// clients/hapr_client/src/instructions/staking.rs
use anchor_lang::prelude::Pubkey;

use super::{OperationBuilder, OperationRequest};
use crate::codec::HaprInstruction;
use crate::contexts::{StakeTokens, UnstakeTokens};
use crate::errors::ClientResult;

impl OperationBuilder {
    /// Opcode 5. The staker PDA of `user` is derived here; the program
    /// creates it on the first stake.
    pub fn stake(
        &self,
        user: &Pubkey,
        user_token_account: &Pubkey,
        treasury_token_account: &Pubkey,
        amount: u64,
    ) -> ClientResult<OperationRequest> {
        let accounts = StakeTokens {
            user_token_account: *user_token_account,
            treasury_token_account: *treasury_token_account,
            treasury: self.deriver.treasury()?.address,
            user: *user,
            staker: self.deriver.staker(user)?.address,
        };
        Ok(self.request(HaprInstruction::Stake { amount }, &accounts))
    }

    /// Opcode 6.
    pub fn unstake(
        &self,
        user: &Pubkey,
        user_token_account: &Pubkey,
        treasury_token_account: &Pubkey,
        amount: u64,
    ) -> ClientResult<OperationRequest> {
        let accounts = UnstakeTokens {
            user: *user,
            staker: self.deriver.staker(user)?.address,
            user_token_account: *user_token_account,
            treasury_token_account: *treasury_token_account,
            treasury: self.deriver.treasury()?.address,
        };
        Ok(self.request(HaprInstruction::Unstake { amount }, &accounts))
    }
}
