//! Configuration structures for journal-core.
//!
//! This module defines explicit configuration objects used by higher-level
//! components (CLI, transports) to select a cluster, a program id and the
//! input limits applied before any write.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::errors::{JournalError, JournalResult};
use crate::model::Address;

/// Maximum length of a single PDA seed. Titles are used as a seed verbatim.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum message length accepted by the program.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub cluster: Cluster,
    /// Overrides the program id resolved for the cluster.
    pub program_id: Option<Address>,
    pub commitment: Commitment,
    pub limits: LimitsConfig,
    pub cache: CacheConfig,
}

/// Input limits enforced client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_title_bytes: usize,
    pub max_message_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_title_bytes: MAX_SEED_LEN,
            max_message_bytes: MAX_MESSAGE_LEN,
        }
    }
}

/// Query cache behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// When false every read goes to the network.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Commitment level used for reads and confirmations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    pub fn parse(s: &str) -> JournalResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(JournalError::config(format!("unsupported commitment: {s}"))),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> JournalResult<()> {
    if cfg.limits.max_title_bytes == 0 {
        return Err(JournalError::config("max_title_bytes must be greater than zero"));
    }

    if cfg.limits.max_title_bytes > MAX_SEED_LEN {
        return Err(JournalError::config(format!(
            "max_title_bytes must not exceed the {MAX_SEED_LEN}-byte seed limit"
        )));
    }

    if cfg.limits.max_message_bytes == 0 {
        return Err(JournalError::config("max_message_bytes must be greater than zero"));
    }

    Ok(())
}
