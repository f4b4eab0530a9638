use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::codec::Opcode;
use crate::pda::SeedLabel;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure reported by one of the injected collaborators (RPC, wallet,
/// associated token helper). The client never retries it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no off-curve address for seed label {label} under program {program_id}")]
    DerivationExhausted { label: SeedLabel, program_id: Pubkey },

    #[error("{operation}: account {address} is owned by {actual}, expected {expected}")]
    OwnershipMismatch {
        operation: &'static str,
        address: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },

    #[error("{operation}: required account {address} does not exist")]
    AccountMissing {
        operation: &'static str,
        address: Pubkey,
    },

    #[error("{operation}: transport failure at {address}: {source}")]
    Transport {
        operation: &'static str,
        address: Pubkey,
        #[source]
        source: TransportError,
    },

    #[error("opcode {opcode} takes {expected} argument(s), got {actual}")]
    ArgumentCount {
        opcode: Opcode,
        expected: usize,
        actual: usize,
    },

    #[error("invalid instruction data")]
    InvalidInstructionData,

    #[error("account {address} holds data that does not match the expected layout")]
    InvalidAccountData { address: Pubkey },
}

impl ClientError {
    pub(crate) fn transport(operation: &'static str, address: Pubkey, source: TransportError) -> Self {
        Self::Transport {
            operation,
            address,
            source,
        }
    }

    /// Caller may retry the same operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
