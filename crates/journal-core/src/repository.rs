//! Entry repository.
//!
//! The repository issues read queries (all entries, one entry, program
//! account status) and writes (create, update, delete) against a
//! `ProgramClient`, and owns the cache invalidation policy:
//! - reads are pull-based and served from the query cache when present
//! - read failures are returned to the caller and never cached
//! - a read that overlaps a write's invalidation is not cached
//! - a successful write notifies the user, invalidates the affected keys and
//!   refetches the entry list exactly once
//! - a failed write notifies the user and returns the error; nothing is retried
//!
//! Each write moves through `Idle -> Pending -> Idle`. While a write for a
//! given `(kind, cluster, title)` is pending, an identical request is rejected.
//! There is no cancellation: a pending write runs until the network settles it.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::cache::{CachedValue, EntryQueryCache, QueryKey};
use crate::client::ProgramClient;
use crate::config::{ClientConfig, LimitsConfig};
use crate::errors::{JournalError, JournalResult};
use crate::model::{sort_entries, Address, EntryAccount, JournalEntry, ProgramStatus, TxSignature};
use crate::notify::Notifier;
use crate::session::Session;
use crate::validate::{validate_entry_input, validate_title};

/// Arguments for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryArgs {
    pub title: String,
    pub message: String,
    pub owner: Address,
}

impl EntryArgs {
    pub fn new(title: impl Into<String>, message: impl Into<String>, owner: Address) -> Self {
        Self { title: title.into(), message: message.into(), owner }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationStatus {
    Idle,
    Pending,
}

type MutationKey = (MutationKind, String, String);

#[derive(Debug, Default)]
struct MutationTracker {
    pending: Mutex<HashSet<MutationKey>>,
}

impl MutationTracker {
    fn begin(&self, kind: MutationKind, cluster: String, title: &str) -> JournalResult<PendingGuard<'_>> {
        let key = (kind, cluster, title.to_string());
        if !self.pending.lock().insert(key.clone()) {
            return Err(JournalError::MutationPending { kind: kind.as_str(), title: title.to_string() });
        }
        Ok(PendingGuard { tracker: self, key })
    }

    fn any(&self, kind: MutationKind) -> bool {
        self.pending.lock().iter().any(|(k, _, _)| *k == kind)
    }

    fn contains(&self, kind: MutationKind, cluster: &str, title: &str) -> bool {
        self.pending
            .lock()
            .iter()
            .any(|(k, c, t)| *k == kind && c == cluster && t == title)
    }
}

/// Clears the pending flag when the write settles, whatever the outcome.
struct PendingGuard<'a> {
    tracker: &'a MutationTracker,
    key: MutationKey,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.tracker.pending.lock().remove(&self.key);
    }
}

pub struct EntryRepository<C, N> {
    client: C,
    notifier: N,
    cache: EntryQueryCache,
    mutations: MutationTracker,
    limits: LimitsConfig,
    cache_enabled: bool,
}

impl<C: ProgramClient, N: Notifier> EntryRepository<C, N> {
    pub fn new(client: C, notifier: N) -> Self {
        Self::with_config(client, notifier, &ClientConfig::default())
    }

    pub fn with_config(client: C, notifier: N, config: &ClientConfig) -> Self {
        Self {
            client,
            notifier,
            cache: EntryQueryCache::new(),
            mutations: MutationTracker::default(),
            limits: config.limits.clone(),
            cache_enabled: config.cache.enabled,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn cache(&self) -> &EntryQueryCache {
        &self.cache
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Pending if any write of this kind is in flight.
    pub fn mutation_status(&self, kind: MutationKind) -> MutationStatus {
        if self.mutations.any(kind) {
            MutationStatus::Pending
        } else {
            MutationStatus::Idle
        }
    }

    pub fn is_pending(&self, session: &Session, kind: MutationKind, title: &str) -> bool {
        self.mutations.contains(kind, &session.cluster.cache_key(), title.trim())
    }

    // ---- reads ----

    /// All entries on the session's cluster, sorted by title.
    pub async fn list_entries(&self, session: &Session) -> JournalResult<Arc<Vec<EntryAccount>>> {
        let key = QueryKey::all_entries(&session.cluster.cache_key());
        if let Some(CachedValue::Entries(entries)) = self.cached(&key) {
            return Ok(entries);
        }
        self.fetch_all(key).await
    }

    /// Drop the cached list and fetch it again.
    pub async fn refresh_entries(&self, session: &Session) -> JournalResult<Arc<Vec<EntryAccount>>> {
        let key = QueryKey::all_entries(&session.cluster.cache_key());
        self.cache.invalidate(&key);
        self.fetch_all(key).await
    }

    pub async fn fetch_program_status(&self, session: &Session) -> JournalResult<ProgramStatus> {
        let key = QueryKey::program_account(&session.cluster.cache_key());
        if let Some(CachedValue::Status(status)) = self.cached(&key) {
            return Ok(status);
        }
        let generation = self.cache.generation(&key);
        tracing::debug!(cluster = %session.cluster, program_id = %self.client.program_id(), "fetching program account");
        let status = self.client.program_status().await.map_err(|e| {
            tracing::warn!(error = %e, "program account query failed");
            e
        })?;
        self.store(key, generation, CachedValue::Status(status.clone()));
        Ok(status)
    }

    /// Like `fetch_program_status`, but a missing program is an error.
    pub async fn require_deployed(&self, session: &Session) -> JournalResult<ProgramStatus> {
        let status = self.fetch_program_status(session).await?;
        if !status.deployed {
            return Err(JournalError::ProgramNotDeployed {
                program_id: status.program_id.to_string(),
                cluster: session.cluster.to_string(),
            });
        }
        Ok(status)
    }

    /// `Ok(None)` when the account does not exist.
    pub async fn fetch_entry(&self, session: &Session, address: &Address) -> JournalResult<Option<JournalEntry>> {
        let key = QueryKey::entry(&session.cluster.cache_key(), address);
        if let Some(CachedValue::Entry(entry)) = self.cached(&key) {
            return Ok(entry);
        }
        let generation = self.cache.generation(&key);
        tracing::debug!(%address, "fetching journal entry");
        let entry = self.client.fetch_entry(address).await.map_err(|e| {
            tracing::warn!(%address, error = %e, "journal entry query failed");
            e
        })?;
        self.store(key, generation, CachedValue::Entry(entry.clone()));
        Ok(entry)
    }

    pub async fn fetch_entry_by_title(
        &self,
        session: &Session,
        owner: &Address,
        title: &str,
    ) -> JournalResult<Option<JournalEntry>> {
        let title = validate_title(title, &self.limits)?;
        let address = self.client.entry_address(owner, &title)?;
        self.fetch_entry(session, &address).await
    }

    // ---- writes ----

    pub async fn create_entry(&self, session: &Session, args: EntryArgs) -> JournalResult<TxSignature> {
        let owner = authorize(session, &args.owner)?;
        let input = validate_entry_input(&args.title, &args.message, &self.limits)?;
        let _pending = self.mutations.begin(MutationKind::Create, session.cluster.cache_key(), &input.title)?;

        let result = self
            .client
            .create_journal_entry(&owner, &input.title, &input.message)
            .await;
        self.settle(session, MutationKind::Create, &owner, &input.title, result).await
    }

    /// The entry must already exist; the title is the key and never changes.
    pub async fn update_entry(&self, session: &Session, args: EntryArgs) -> JournalResult<TxSignature> {
        let owner = authorize(session, &args.owner)?;
        let input = validate_entry_input(&args.title, &args.message, &self.limits)?;
        let _pending = self.mutations.begin(MutationKind::Update, session.cluster.cache_key(), &input.title)?;

        let result = self.submit_update(&owner, &input.title, &input.message).await;
        self.settle(session, MutationKind::Update, &owner, &input.title, result).await
    }

    pub async fn delete_entry(&self, session: &Session, title: &str) -> JournalResult<TxSignature> {
        let owner = session.require_identity()?;
        let title = validate_title(title, &self.limits)?;
        let _pending = self.mutations.begin(MutationKind::Delete, session.cluster.cache_key(), &title)?;

        let result = self.client.delete_journal_entry(&owner, &title).await;
        self.settle(session, MutationKind::Delete, &owner, &title, result).await
    }

    async fn submit_update(&self, owner: &Address, title: &str, message: &str) -> JournalResult<TxSignature> {
        let address = self.client.entry_address(owner, title)?;
        if self.client.fetch_entry(&address).await?.is_none() {
            return Err(JournalError::not_found(format!("journal entry `{title}`")));
        }
        self.client.update_journal_entry(owner, title, message).await
    }

    async fn settle(
        &self,
        session: &Session,
        kind: MutationKind,
        owner: &Address,
        title: &str,
        result: JournalResult<TxSignature>,
    ) -> JournalResult<TxSignature> {
        match result {
            Ok(signature) => {
                tracing::info!(kind = kind.as_str(), %title, %signature, cluster = %session.cluster, "journal entry write confirmed");
                self.notifier.transaction_sent(&session.cluster, &signature);

                let cluster_key = session.cluster.cache_key();
                if let Ok(address) = self.client.entry_address(owner, title) {
                    self.cache.invalidate(&QueryKey::entry(&cluster_key, &address));
                }
                if let Err(e) = self.refresh_entries(session).await {
                    tracing::warn!(error = %e, "entry list refetch after write failed");
                }
                Ok(signature)
            }
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), %title, error = %e, "journal entry write failed");
                self.notifier.error(&format!("Error {} entry: {e}", kind.verb()));
                Err(e)
            }
        }
    }

    async fn fetch_all(&self, key: QueryKey) -> JournalResult<Arc<Vec<EntryAccount>>> {
        let generation = self.cache.generation(&key);
        tracing::debug!(cluster = %key.cluster, "fetching all journal entries");
        let mut entries = self.client.all_entries().await.map_err(|e| {
            tracing::warn!(error = %e, "journal entry list query failed");
            e
        })?;
        sort_entries(&mut entries);
        let entries = Arc::new(entries);
        self.store(key, generation, CachedValue::Entries(entries.clone()));
        Ok(entries)
    }

    fn cached(&self, key: &QueryKey) -> Option<CachedValue> {
        if self.cache_enabled {
            self.cache.get(key)
        } else {
            None
        }
    }

    /// Results of reads that raced an invalidation are returned but not cached.
    fn store(&self, key: QueryKey, generation: u64, value: CachedValue) {
        if self.cache_enabled {
            self.cache.insert_if_current(key, generation, value);
        }
    }
}

fn authorize(session: &Session, owner: &Address) -> JournalResult<Address> {
    let identity = session.require_identity()?;
    if identity != *owner {
        return Err(JournalError::validation(format!(
            "owner {owner} does not match the connected wallet {identity}"
        )));
    }
    Ok(identity)
}
