//! journal-core
//!
//! Core primitives for the journal client:
//! - Journal entry model and addresses
//! - Error taxonomy shared by every layer
//! - Cluster/session context passed explicitly into each call
//! - The `ProgramClient` seam implemented by transport crates
//! - `EntryRepository` with its keyed query cache
//! - View states for list/card/form front ends
//!
//! The core crate does not do network I/O itself. Transport crates implement
//! `ProgramClient` and front ends render the view states.

pub mod cache;
pub mod client;
pub mod cluster;
pub mod config;
pub mod errors;
pub mod model;
pub mod notify;
pub mod repository;
pub mod session;
pub mod validate;
pub mod views;

pub use crate::errors::{JournalError, JournalResult};

/// Name of the on-chain account type holding one entry.
pub const ENTRY_ACCOUNT_NAME: &str = "JournalEntryState";

/// Convenience re-exports.
pub mod prelude {
    pub use crate::cache::{EntryQueryCache, QueryKey, QueryKind};
    pub use crate::client::ProgramClient;
    pub use crate::cluster::{Cluster, ClusterNetwork};
    pub use crate::config::{ClientConfig, LimitsConfig};
    pub use crate::model::{Address, EntryAccount, JournalEntry, ProgramStatus, TxSignature};
    pub use crate::notify::{MemoryNotifier, Notification, Notifier};
    pub use crate::repository::{EntryArgs, EntryRepository, MutationKind, MutationStatus};
    pub use crate::session::Session;
    pub use crate::views::{
        CreateEntryForm, DeleteControl, EntryCardView, FormOutcome, ListView, QueryState,
        RenderState, SubmitControl, UpdateEntryForm,
    };
    pub use crate::{JournalError, JournalResult};
}
