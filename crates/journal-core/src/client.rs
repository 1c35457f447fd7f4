//! Program client seam.
//!
//! `ProgramClient` is the boundary between the repository and whatever
//! actually talks to the journal program: an RPC transport in production, an
//! in-memory fake in tests. Implementations are bound to one cluster and one
//! signer; the repository never sees keys or transactions.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::JournalResult;
use crate::model::{Address, EntryAccount, JournalEntry, ProgramStatus, TxSignature};

/// Generic client interface for the journal program.
#[async_trait]
pub trait ProgramClient: Send + Sync {
    fn program_id(&self) -> Address;

    /// Account address of the entry `title` owned by `owner`.
    fn entry_address(&self, owner: &Address, title: &str) -> JournalResult<Address>;

    async fn program_status(&self) -> JournalResult<ProgramStatus>;

    /// Every entry account owned by the program.
    async fn all_entries(&self) -> JournalResult<Vec<EntryAccount>>;

    /// `Ok(None)` when no account exists at `address`.
    async fn fetch_entry(&self, address: &Address) -> JournalResult<Option<JournalEntry>>;

    async fn create_journal_entry(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> JournalResult<TxSignature>;

    async fn update_journal_entry(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> JournalResult<TxSignature>;

    async fn delete_journal_entry(&self, owner: &Address, title: &str) -> JournalResult<TxSignature>;
}

#[async_trait]
impl<C: ProgramClient + ?Sized> ProgramClient for Arc<C> {
    fn program_id(&self) -> Address {
        (**self).program_id()
    }

    fn entry_address(&self, owner: &Address, title: &str) -> JournalResult<Address> {
        (**self).entry_address(owner, title)
    }

    async fn program_status(&self) -> JournalResult<ProgramStatus> {
        (**self).program_status().await
    }

    async fn all_entries(&self) -> JournalResult<Vec<EntryAccount>> {
        (**self).all_entries().await
    }

    async fn fetch_entry(&self, address: &Address) -> JournalResult<Option<JournalEntry>> {
        (**self).fetch_entry(address).await
    }

    async fn create_journal_entry(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> JournalResult<TxSignature> {
        (**self).create_journal_entry(owner, title, message).await
    }

    async fn update_journal_entry(
        &self,
        owner: &Address,
        title: &str,
        message: &str,
    ) -> JournalResult<TxSignature> {
        (**self).update_journal_entry(owner, title, message).await
    }

    async fn delete_journal_entry(&self, owner: &Address, title: &str) -> JournalResult<TxSignature> {
        (**self).delete_journal_entry(owner, title).await
    }
}
