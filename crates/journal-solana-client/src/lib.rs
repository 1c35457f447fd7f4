//! journal-solana-client
//!
//! This crate provides a small, focused Rust client for interacting with the
//! journal on-chain program.
//!
//! It includes:
//! - PDA derivation helpers
//! - constant seeds, discriminators and the default program id
//! - instruction builders and account decoding for the program's layout
//! - `RpcProgramClient`, the `journal_core::client::ProgramClient` over Solana RPC
//!
//! Note: the program id can be overridden by the consumer. The default here
//! matches the id the program is deployed under by its scaffold.

pub mod account;
pub mod constants;
pub mod instruction;
pub mod pda;
pub mod rpc_client;

pub use account::*;
pub use constants::*;
pub use instruction::*;
pub use pda::*;
pub use rpc_client::*;

use journal_core::model::Address;
use solana_program::pubkey::Pubkey;

/// Convert a core address into a Solana pubkey.
pub fn to_pubkey(address: &Address) -> Pubkey {
    Pubkey::new_from_array(address.to_bytes())
}

/// Convert a Solana pubkey into a core address.
pub fn to_address(pubkey: &Pubkey) -> Address {
    Address::new(pubkey.to_bytes())
}
