//! Journal entry account layout.
//!
//! Account data is `sha256("account:JournalEntryState")[..8]` followed by the
//! borsh-encoded state. Accounts are allocated at their maximum size, so
//! trailing bytes after the encoded state are expected and ignored.

use borsh::{BorshDeserialize, BorshSerialize};
use journal_core::model::{Address, JournalEntry};
use journal_core::{JournalError, JournalResult, ENTRY_ACCOUNT_NAME};

use crate::constants::{ACCOUNT_NAMESPACE, DISCRIMINATOR_LEN};
use crate::instruction::discriminator;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct JournalEntryState {
    pub owner: [u8; 32],
    pub title: String,
    pub message: String,
}

pub fn account_discriminator() -> [u8; DISCRIMINATOR_LEN] {
    discriminator(ACCOUNT_NAMESPACE, ENTRY_ACCOUNT_NAME)
}

impl JournalEntryState {
    pub fn decode(data: &[u8]) -> JournalResult<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(JournalError::decode("account data shorter than discriminator"));
        }
        let (tag, mut payload) = data.split_at(DISCRIMINATOR_LEN);
        if tag != account_discriminator() {
            return Err(JournalError::decode(format!("account is not a {ENTRY_ACCOUNT_NAME}")));
        }
        Self::deserialize(&mut payload).map_err(|e| JournalError::decode(e.to_string()))
    }
}

impl From<JournalEntryState> for JournalEntry {
    fn from(s: JournalEntryState) -> Self {
        JournalEntry { owner: Address::new(s.owner), title: s.title, message: s.message }
    }
}
