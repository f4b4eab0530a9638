#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_spl::token;
use async_trait::async_trait;

use hapr_client::{
    associated_storage_address, AccountLookup, AddressDeriver, AssociatedStorage, ProtocolConfig, RemoteAccount,
    StorageOutcome, SubmissionDriver, TransactionId, TransactionSubmitter, TransportError, TREASURY_ACCOUNT_SIZE,
};

pub const TOKEN_ACCOUNT_SIZE: usize = 165;

/// One get-or-create call as seen by the storage collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageCall {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub allow_off_curve_owner: bool,
}

#[derive(Clone, Debug)]
pub struct Submission {
    pub instructions: Vec<Instruction>,
    pub signers: Vec<Pubkey>,
}

/// In-memory ledger standing in for the RPC node, the associated token
/// helper and the wallet at once.
pub struct FakeChain {
    config: ProtocolConfig,
    accounts: Mutex<HashMap<Pubkey, RemoteAccount>>,
    submissions: Mutex<Vec<Submission>>,
    storage_calls: Mutex<Vec<StorageCall>>,
    pub fail_lookup: AtomicBool,
    pub fail_storage: AtomicBool,
    pub fail_submit: AtomicBool,
}

impl FakeChain {
    pub fn new(config: ProtocolConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            accounts: Mutex::new(HashMap::new()),
            submissions: Mutex::new(Vec::new()),
            storage_calls: Mutex::new(Vec::new()),
            fail_lookup: AtomicBool::new(false),
            fail_storage: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
        })
    }

    /// A chain where the treasury was initialized and the mint exists.
    pub fn initialized(config: ProtocolConfig, admin: &Pubkey) -> Arc<Self> {
        let chain = Self::new(config);
        chain.put(chain.treasury(), RemoteAccount::new(config.program_id, treasury_data(admin)));
        chain.put_mint(token::ID);
        chain
    }

    pub fn deriver(&self) -> AddressDeriver {
        AddressDeriver::new(self.config)
    }

    pub fn treasury(&self) -> Pubkey {
        self.deriver().treasury().unwrap().address
    }

    pub fn mint(&self) -> Pubkey {
        self.deriver().mint().unwrap().address
    }

    pub fn storage_of(&self, owner: &Pubkey) -> Pubkey {
        associated_storage_address(&self.mint(), owner)
    }

    pub fn put(&self, address: Pubkey, account: RemoteAccount) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub fn put_mint(&self, owner: Pubkey) {
        self.put(self.mint(), RemoteAccount::new(owner, vec![0; 82]));
    }

    pub fn account(&self, address: &Pubkey) -> Option<RemoteAccount> {
        self.accounts.lock().unwrap().get(address).cloned()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submitted_tags(&self) -> Vec<u8> {
        self.submissions()
            .iter()
            .flat_map(|s| s.instructions.iter().map(|ix| ix.data[0]))
            .collect()
    }

    pub fn storage_calls(&self) -> Vec<StorageCall> {
        self.storage_calls.lock().unwrap().clone()
    }

    pub fn driver(self: &Arc<Self>, payer: Pubkey) -> SubmissionDriver {
        SubmissionDriver::new(self.config, payer, self.clone(), self.clone(), self.clone())
    }

    fn apply(&self, instruction: &Instruction) {
        // Opcode 3 flips the treasury flag and creates the mint, as the
        // program does.
        if instruction.data.first() == Some(&3) {
            let admin = instruction.accounts[1].pubkey;
            self.put(
                instruction.accounts[0].pubkey,
                RemoteAccount::new(self.config.program_id, treasury_data(&admin)),
            );
            self.put_mint(token::ID);
        }
    }
}

pub fn treasury_data(admin: &Pubkey) -> Vec<u8> {
    let mut data = vec![1u8];
    data.extend_from_slice(admin.as_ref());
    data.resize(TREASURY_ACCOUNT_SIZE, 0);
    data
}

#[async_trait]
impl AccountLookup for FakeChain {
    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<RemoteAccount>, TransportError> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(TransportError::new("rpc unavailable"));
        }
        Ok(self.account(address))
    }
}

#[async_trait]
impl AssociatedStorage for FakeChain {
    async fn get_or_create(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
        allow_off_curve_owner: bool,
    ) -> Result<StorageOutcome, TransportError> {
        self.storage_calls.lock().unwrap().push(StorageCall {
            mint: *mint,
            owner: *owner,
            allow_off_curve_owner,
        });
        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(TransportError::new("associated token program rejected the request"));
        }

        let address = associated_storage_address(mint, owner);
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&address) {
            return Ok(StorageOutcome::Found(address));
        }
        accounts.insert(address, RemoteAccount::new(token::ID, vec![0; TOKEN_ACCOUNT_SIZE]));
        Ok(StorageOutcome::Created(address))
    }
}

#[async_trait]
impl TransactionSubmitter for FakeChain {
    async fn submit(&self, instructions: &[Instruction], signers: &[Pubkey]) -> Result<TransactionId, TransportError> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(TransportError::new("blockhash not found"));
        }
        for instruction in instructions {
            self.apply(instruction);
        }

        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(Submission {
            instructions: instructions.to_vec(),
            signers: signers.to_vec(),
        });
        Ok(TransactionId(format!("sig-{}", submissions.len())))
    }
}
