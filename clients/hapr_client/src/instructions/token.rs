// clients/hapr_client/src/instructions/token.rs
use anchor_lang::prelude::Pubkey;

use super::{OperationBuilder, OperationRequest};
use crate::codec::HaprInstruction;
use crate::contexts::{BurnTokens, MintTokens, TransferTokens};
use crate::errors::ClientResult;

impl OperationBuilder {
    /// Opcode 0. The treasury PDA is the mint authority.
    pub fn mint(&self, payer: &Pubkey, recipient_token_account: &Pubkey, amount: u64) -> ClientResult<OperationRequest> {
        let accounts = MintTokens {
            payer: *payer,
            mint: self.deriver.mint()?.address,
            recipient_token_account: *recipient_token_account,
            treasury: self.deriver.treasury()?.address,
        };
        Ok(self.request(HaprInstruction::Mint { amount }, &accounts))
    }

    /// Opcode 1.
    pub fn burn(&self, payer: &Pubkey, burn_token_account: &Pubkey, amount: u64) -> ClientResult<OperationRequest> {
        let accounts = BurnTokens {
            payer: *payer,
            burn_token_account: *burn_token_account,
            mint: self.deriver.mint()?.address,
            treasury: self.deriver.treasury()?.address,
        };
        Ok(self.request(HaprInstruction::Burn { amount }, &accounts))
    }

    /// Opcode 4. `sender` owns and signs for `sender_token_account`.
    pub fn transfer(
        &self,
        sender: &Pubkey,
        sender_token_account: &Pubkey,
        recipient_token_account: &Pubkey,
        amount: u64,
    ) -> ClientResult<OperationRequest> {
        let accounts = TransferTokens {
            sender_token_account: *sender_token_account,
            recipient_token_account: *recipient_token_account,
            mint: self.deriver.mint()?.address,
            sender: *sender,
        };
        Ok(self.request(HaprInstruction::Transfer { amount }, &accounts))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::roles;
    use super::*;
    use crate::config::ProtocolConfig;
    use anchor_lang::solana_program::{system_program, sysvar};
    use anchor_spl::token;

    fn setup() -> (OperationBuilder, Pubkey, Pubkey) {
        let builder = OperationBuilder::new(ProtocolConfig::default());
        let treasury = builder.deriver().treasury().unwrap().address;
        let mint = builder.deriver().mint().unwrap().address;
        (builder, treasury, mint)
    }

    #[test]
    fn mint_accounts_and_data() {
        let (builder, treasury, mint) = setup();
        let payer = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();

        let request = builder.mint(&payer, &recipient, 50_000_000).unwrap();

        let mut data = vec![0u8];
        data.extend_from_slice(&50_000_000u64.to_le_bytes());
        assert_eq!(request.data(), data);
        assert_eq!(
            roles(&request.accounts),
            vec![
                (payer, true, true),
                (mint, false, true),
                (recipient, false, true),
                (treasury, false, false),
                (system_program::ID, false, false),
                (token::ID, false, false),
            ]
        );
    }

    #[test]
    fn burn_accounts_include_rent_sysvar() {
        let (builder, treasury, mint) = setup();
        let payer = Pubkey::new_unique();
        let storage = Pubkey::new_unique();

        let request = builder.burn(&payer, &storage, 200).unwrap();
        assert_eq!(request.data()[0], 1);
        assert_eq!(
            roles(&request.accounts),
            vec![
                (payer, true, true),
                (storage, false, true),
                (mint, false, true),
                (treasury, false, false),
                (system_program::ID, false, false),
                (token::ID, false, false),
                (sysvar::rent::ID, false, false),
            ]
        );
    }

    #[test]
    fn transfer_keeps_sender_before_recipient() {
        let (builder, _, mint) = setup();
        let sender = Pubkey::new_unique();
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();

        let request = builder.transfer(&sender, &from, &to, 100).unwrap();
        assert_eq!(request.data()[0], 4);
        assert_eq!(
            roles(&request.accounts),
            vec![
                (from, false, true),
                (to, false, true),
                (mint, false, false),
                (sender, true, false),
                (system_program::ID, false, false),
                (token::ID, false, false),
            ]
        );

        let swapped = builder.transfer(&sender, &to, &from, 100).unwrap();
        assert_ne!(swapped.accounts, request.accounts);
        assert_eq!(request.signers(), vec![sender]);
    }
}
