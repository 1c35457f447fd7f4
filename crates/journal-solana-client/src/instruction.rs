//! Journal program instruction encoding.
//!
//! Instruction data is an 8-byte discriminator, `sha256("global:<name>")[..8]`,
//! followed by the borsh-encoded arguments. All three instructions take the
//! same accounts:
//! 0. `[writable]` entry PDA derived from `[title, owner]`
//! 1. `[writable, signer]` owner, pays for and receives rent
//! 2. `[]` system program

use anyhow::{anyhow, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;

use crate::constants::{DISCRIMINATOR_LEN, IX_CREATE, IX_DELETE, IX_NAMESPACE, IX_UPDATE};
use crate::pda;

/// `sha256("<namespace>:<name>")[..8]`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct EntryArgsData {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeleteArgsData {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalIx {
    CreateJournalEntry(EntryArgsData),
    UpdateJournalEntry(EntryArgsData),
    DeleteJournalEntry(DeleteArgsData),
}

impl JournalIx {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateJournalEntry(_) => IX_CREATE,
            Self::UpdateJournalEntry(_) => IX_UPDATE,
            Self::DeleteJournalEntry(_) => IX_DELETE,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::CreateJournalEntry(a) | Self::UpdateJournalEntry(a) => &a.title,
            Self::DeleteJournalEntry(a) => &a.title,
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = discriminator(IX_NAMESPACE, self.name()).to_vec();
        let payload = match self {
            Self::CreateJournalEntry(a) | Self::UpdateJournalEntry(a) => borsh::to_vec(a),
            Self::DeleteJournalEntry(a) => borsh::to_vec(a),
        }
        .map_err(|e| anyhow!("serialize: {e}"))?;
        out.extend_from_slice(&payload);
        Ok(out)
    }
}

/// Build the instruction for `ix`, deriving the entry PDA from its title.
pub fn build_instruction(program_id: &Pubkey, owner: &Pubkey, ix: &JournalIx) -> Result<Instruction> {
    let entry = pda::derive_entry(program_id, owner, ix.title())?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(entry.address, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(solana_program::system_program::id(), false),
        ],
        data: ix.to_vec()?,
    })
}

pub fn ix_create_entry(program_id: &Pubkey, owner: &Pubkey, title: &str, message: &str) -> Result<Instruction> {
    let ix = JournalIx::CreateJournalEntry(EntryArgsData { title: title.to_string(), message: message.to_string() });
    build_instruction(program_id, owner, &ix)
}

pub fn ix_update_entry(program_id: &Pubkey, owner: &Pubkey, title: &str, message: &str) -> Result<Instruction> {
    let ix = JournalIx::UpdateJournalEntry(EntryArgsData { title: title.to_string(), message: message.to_string() });
    build_instruction(program_id, owner, &ix)
}

pub fn ix_delete_entry(program_id: &Pubkey, owner: &Pubkey, title: &str) -> Result<Instruction> {
    let ix = JournalIx::DeleteJournalEntry(DeleteArgsData { title: title.to_string() });
    build_instruction(program_id, owner, &ix)
}
