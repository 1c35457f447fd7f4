//! Error taxonomy for the journal client.
//!
//! Every layer (repository, transport, views) reports failures through
//! `JournalError`. The variants map onto how a front end reacts:
//! - `NotConnected`: block all writes, show a connect prompt
//! - `Validation`: block submit client-side, no network call
//! - `Network`: notify the user, abandon the attempt, no retry
//! - `NotFound`: render an empty state

use thiserror::Error;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// No identity is available for a write.
    #[error("wallet not connected")]
    NotConnected,

    /// Input rejected before any network call.
    #[error("invalid input: {0}")]
    Validation(String),

    /// RPC or transaction failure reported by the network layer.
    #[error("{0}")]
    Network(String),

    /// The addressed account does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Account data could not be decoded as a journal entry.
    #[error("decode error: {0}")]
    Decode(String),

    /// The program account is missing or not executable on the selected cluster.
    #[error("program {program_id} is not deployed on {cluster}")]
    ProgramNotDeployed { program_id: String, cluster: String },

    /// An identical write is still in flight.
    #[error("{kind} request for `{title}` is already pending")]
    MutationPending { kind: &'static str, title: String },

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl JournalError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable code, used in JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::Validation(_) => "validation",
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::Decode(_) => "decode",
            Self::ProgramNotDeployed { .. } => "program_not_deployed",
            Self::MutationPending { .. } => "mutation_pending",
            Self::Config(_) => "config",
        }
    }

    /// True for errors raised client-side before touching the network.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::NotConnected | Self::Validation(_) | Self::MutationPending { .. } | Self::Config(_)
        )
    }
}
