//! Journal data models.
//!
//! Entries exist only as on-chain state. The client holds read-through copies
//! and never mutates them locally; every change goes through a write on the
//! program followed by a refetch.
//!
//! Design goals:
//! - **Transport independence:** addresses are plain 32-byte values rendered
//!   as base58, so the core does not depend on any Solana SDK crate.
//! - **Serde friendly:** models serialize to the shapes the CLI prints with `--json`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{JournalError, JournalResult};

/// A 32-byte account address or identity key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 32]);

impl Address {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> JournalResult<Self> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            JournalError::decode(format!("address must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }
}

impl FromStr for Address {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| JournalError::validation(format!("invalid base58 address: {s}")))?;
        if bytes.len() != Self::LEN {
            return Err(JournalError::validation(format!(
                "invalid address length: expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One journal entry as stored by the program.
///
/// `title` is the entry key: unique per owner and immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub owner: Address,
    pub title: String,
    pub message: String,
}

/// An entry together with the account address it lives at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryAccount {
    pub address: Address,
    pub entry: JournalEntry,
}

/// Opaque receipt identifying a submitted write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxSignature(String);

impl TxSignature {
    pub fn new(sig: impl Into<String>) -> Self {
        Self(sig.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment state of the program account on a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStatus {
    pub program_id: Address,
    pub deployed: bool,
    /// Present when the program account exists at all.
    pub metadata: Option<ProgramMetadata>,
}

impl ProgramStatus {
    pub fn missing(program_id: Address) -> Self {
        Self { program_id, deployed: false, metadata: None }
    }
}

/// Account-level facts about the program account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramMetadata {
    /// Loader that owns the program account.
    pub owner: Address,
    pub executable: bool,
    pub lamports: u64,
    pub data_len: usize,
}

/// Sort entries by title, then address, so every listing has a stable order.
pub fn sort_entries(entries: &mut [EntryAccount]) {
    entries.sort_by(|a, b| {
        a.entry
            .title
            .cmp(&b.entry.title)
            .then_with(|| a.address.cmp(&b.address))
    });
}
