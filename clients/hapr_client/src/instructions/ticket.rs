// clients/hapr_client/src/instructions/ticket.rs
use anchor_lang::prelude::Pubkey;

use super::{OperationBuilder, OperationRequest};
use crate::codec::HaprInstruction;
use crate::contexts::{PurchaseTicket, RedeemTicket};
use crate::errors::ClientResult;

impl OperationBuilder {
    /// Opcode 7. `amount` and `vesting_seconds` are packed back to back.
    pub fn purchase_ticket(
        &self,
        buyer: &Pubkey,
        buyer_token_account: &Pubkey,
        treasury_token_account: &Pubkey,
        amount: u64,
        vesting_seconds: u64,
    ) -> ClientResult<OperationRequest> {
        let accounts = PurchaseTicket {
            buyer: *buyer,
            buyer_token_account: *buyer_token_account,
            treasury_token_account: *treasury_token_account,
            ticket: self.deriver.ticket(buyer)?.address,
        };
        let instruction = HaprInstruction::PurchaseTicket {
            amount,
            vesting_seconds,
        };
        Ok(self.request(instruction, &accounts))
    }

    /// Opcode 8.
    pub fn redeem_ticket(&self, owner: &Pubkey, owner_token_account: &Pubkey, amount: u64) -> ClientResult<OperationRequest> {
        let accounts = RedeemTicket {
            ticket: self.deriver.ticket(owner)?.address,
            owner: *owner,
            mint: self.deriver.mint()?.address,
            owner_token_account: *owner_token_account,
            treasury: self.deriver.treasury()?.address,
        };
        Ok(self.request(HaprInstruction::RedeemTicket { amount }, &accounts))
    }
}
