//! Keyed query cache owned by the entry repository.
//!
//! Keys are `(cluster, query kind, params)`. Consistency is "refetch after
//! writes": the repository invalidates affected keys once a write settles
//! successfully. The lock is never held across an await point.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::{Address, EntryAccount, JournalEntry, ProgramStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    AllEntries,
    ProgramAccount,
    Entry,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllEntries => "journal-entry.all",
            Self::ProgramAccount => "get-program-account",
            Self::Entry => "journal-entry.fetch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub cluster: String,
    pub kind: QueryKind,
    pub param: Option<String>,
}

impl QueryKey {
    pub fn all_entries(cluster: &str) -> Self {
        Self { cluster: cluster.to_string(), kind: QueryKind::AllEntries, param: None }
    }

    pub fn program_account(cluster: &str) -> Self {
        Self { cluster: cluster.to_string(), kind: QueryKind::ProgramAccount, param: None }
    }

    pub fn entry(cluster: &str, address: &Address) -> Self {
        Self {
            cluster: cluster.to_string(),
            kind: QueryKind::Entry,
            param: Some(address.to_string()),
        }
    }
}

/// A cached query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Entries(Arc<Vec<EntryAccount>>),
    Status(ProgramStatus),
    Entry(Option<JournalEntry>),
}

#[derive(Debug, Default)]
struct CacheState {
    values: HashMap<QueryKey, CachedValue>,
    /// Bumped on every invalidation of a key.
    generations: HashMap<QueryKey, u64>,
}

/// A read takes `generation(key)` before it starts and stores its result with
/// `insert_if_current`. A read that raced an invalidation is dropped, so an
/// older response never replaces the refetch that followed a write.
#[derive(Debug, Default)]
pub struct EntryQueryCache {
    inner: Mutex<CacheState>,
}

impl EntryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<CachedValue> {
        self.inner.lock().values.get(key).cloned()
    }

    /// Current generation of `key`.
    pub fn generation(&self, key: &QueryKey) -> u64 {
        self.inner.lock().generations.get(key).copied().unwrap_or(0)
    }

    /// Store `value` only if `key` was not invalidated since `generation` was read.
    pub fn insert_if_current(&self, key: QueryKey, generation: u64, value: CachedValue) -> bool {
        let mut state = self.inner.lock();
        if state.generations.get(&key).copied().unwrap_or(0) != generation {
            tracing::debug!(kind = key.kind.as_str(), cluster = %key.cluster, "dropping stale query result");
            return false;
        }
        state.values.insert(key, value);
        true
    }

    /// Returns true if the key was present.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let mut state = self.inner.lock();
        *state.generations.entry(key.clone()).or_insert(0) += 1;
        let removed = state.values.remove(key).is_some();
        if removed {
            tracing::debug!(kind = key.kind.as_str(), cluster = %key.cluster, "cache invalidated");
        }
        removed
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.lock().values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(cache: &EntryQueryCache, key: QueryKey, value: CachedValue) {
        let generation = cache.generation(&key);
        assert!(cache.insert_if_current(key, generation, value));
    }

    #[test]
    fn keys_separate_clusters() {
        let cache = EntryQueryCache::new();
        put(&cache, QueryKey::all_entries("devnet"), CachedValue::Entries(Arc::new(vec![])));
        assert!(cache.contains(&QueryKey::all_entries("devnet")));
        assert!(!cache.contains(&QueryKey::all_entries("testnet")));
    }

    #[test]
    fn invalidate_reports_presence() {
        let cache = EntryQueryCache::new();
        let key = QueryKey::entry("devnet", &Address::new([1; 32]));
        assert!(!cache.invalidate(&key));
        put(&cache, key.clone(), CachedValue::Entry(None));
        assert!(cache.invalidate(&key));
        assert!(cache.is_empty());
    }

    #[test]
    fn result_read_before_invalidation_is_dropped() {
        let cache = EntryQueryCache::new();
        let key = QueryKey::all_entries("devnet");

        let stale = cache.generation(&key);
        cache.invalidate(&key);
        let fresh = cache.generation(&key);
        assert!(cache.insert_if_current(key.clone(), fresh, CachedValue::Entries(Arc::new(vec![]))));

        assert!(!cache.insert_if_current(key.clone(), stale, CachedValue::Entry(None)));
        assert_eq!(cache.get(&key), Some(CachedValue::Entries(Arc::new(vec![]))));
    }

    #[test]
    fn generations_are_per_key() {
        let cache = EntryQueryCache::new();
        let list = QueryKey::all_entries("devnet");
        let other = QueryKey::all_entries("testnet");
        let before = cache.generation(&other);
        cache.invalidate(&list);
        assert_eq!(cache.generation(&other), before);
        assert!(cache.insert_if_current(other, before, CachedValue::Entries(Arc::new(vec![]))));
    }
}
