//! Off-chain driver for the HAPR treasury/staking program.
//!
//! The crate derives the program's PDAs, encodes its single-byte-tag
//! instruction format, and sequences submissions through injected
//! collaborators (account lookup, associated token storage, transaction
//! submission). It carries no business logic of the remote program.

use anchor_lang::prelude::*;

pub mod codec;
pub mod config;
pub mod constants;
pub mod contexts;
pub mod driver;
pub mod errors;
pub mod instructions;
pub mod pda;
pub mod resolver;
pub mod state;
pub mod transport;

pub use codec::*;
pub use config::*;
pub use constants::*;
pub use contexts::*;
pub use driver::*;
pub use errors::*;
pub use instructions::*;
pub use pda::*;
pub use resolver::*;
pub use state::*;
pub use transport::*;

declare_id!("ABHENVYtMXfAdN741mJzwoLtqGW7ntpT9uhr2f1Q7wB1");
