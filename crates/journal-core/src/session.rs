//! Explicit session context.
//!
//! Every repository call takes a `Session` describing the selected cluster and
//! the connected identity, instead of reading ambient global state.

use serde::Serialize;

use crate::cluster::Cluster;
use crate::errors::{JournalError, JournalResult};
use crate::model::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub cluster: Cluster,
    /// Connected wallet, if any.
    pub identity: Option<Address>,
}

impl Session {
    pub fn new(cluster: Cluster, identity: Option<Address>) -> Self {
        Self { cluster, identity }
    }

    pub fn disconnected(cluster: Cluster) -> Self {
        Self { cluster, identity: None }
    }

    pub fn connected(cluster: Cluster, identity: Address) -> Self {
        Self { cluster, identity: Some(identity) }
    }

    pub fn is_connected(&self) -> bool {
        self.identity.is_some()
    }

    pub fn require_identity(&self) -> JournalResult<Address> {
        self.identity.ok_or(JournalError::NotConnected)
    }
}
