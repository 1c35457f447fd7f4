//! In-memory journal program used by the integration tests.
//!
//! Mirrors the on-chain rules the client relies on: titles are unique per
//! owner, update and delete fail on missing entries, and writes can be made
//! to fail with a fixed error message or to take a while to settle.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use journal_core::prelude::*;
use journal_core::model::ProgramMetadata;

#[derive(Default)]
pub struct Calls {
    pub all: AtomicUsize,
    pub fetch: AtomicUsize,
    pub status: AtomicUsize,
    pub writes: AtomicUsize,
}

impl Calls {
    pub fn all(&self) -> usize {
        self.all.load(Ordering::SeqCst)
    }
    pub fn fetch(&self) -> usize {
        self.fetch.load(Ordering::SeqCst)
    }
    pub fn status(&self) -> usize {
        self.status.load(Ordering::SeqCst)
    }
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

pub struct FakeProgram {
    pub entries: Mutex<BTreeMap<Address, JournalEntry>>,
    pub calls: Calls,
    pub deployed: bool,
    pub fail_writes_with: Mutex<Option<String>>,
    pub fail_reads_with: Mutex<Option<String>>,
    pub write_delay: Option<Duration>,
    /// Delays for upcoming reads, consumed one per entry read.
    pub read_delays: Mutex<VecDeque<Duration>>,
}

impl FakeProgram {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            calls: Calls::default(),
            deployed: true,
            fail_writes_with: Mutex::new(None),
            fail_reads_with: Mutex::new(None),
            write_delay: None,
            read_delays: Mutex::new(VecDeque::new()),
        }
    }

    pub fn undeployed() -> Self {
        Self { deployed: false, ..Self::new() }
    }

    pub fn slow(delay: Duration) -> Self {
        Self { write_delay: Some(delay), ..Self::new() }
    }

    pub fn fail_writes(&self, msg: &str) {
        *self.fail_writes_with.lock() = Some(msg.to_string());
    }

    pub fn fail_reads(&self, msg: &str) {
        *self.fail_reads_with.lock() = Some(msg.to_string());
    }

    /// The next entry read takes its snapshot, then waits `delay` before returning it.
    pub fn delay_next_read(&self, delay: Duration) {
        self.read_delays.lock().push_back(delay);
    }

    pub fn heal(&self) {
        *self.fail_writes_with.lock() = None;
        *self.fail_reads_with.lock() = None;
    }

    pub fn seed(&self, owner: Address, title: &str, message: &str) -> Address {
        let address = derive(&owner, title);
        self.entries.lock().insert(
            address,
            JournalEntry { owner, title: title.into(), message: message.into() },
        );
        address
    }

    async fn begin_write(&self) -> JournalResult<()> {
        self.calls.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(d) = self.write_delay {
            tokio::time::sleep(d).await;
        }
        match self.fail_writes_with.lock().clone() {
            Some(msg) => Err(JournalError::network(msg)),
            None => Ok(()),
        }
    }

    fn read_failure(&self) -> JournalResult<()> {
        match self.fail_reads_with.lock().clone() {
            Some(msg) => Err(JournalError::network(msg)),
            None => Ok(()),
        }
    }

    async fn settle_read(&self) {
        let delay = self.read_delays.lock().pop_front();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
    }

    fn signature(&self) -> TxSignature {
        TxSignature::new(format!("sig-{}", self.calls.writes()))
    }
}

/// Distinct per (owner, title) for the short titles used in tests.
pub fn derive(owner: &Address, title: &str) -> Address {
    let mut out = owner.to_bytes();
    for (i, b) in title.bytes().enumerate() {
        out[i % 32] ^= b.rotate_left((i / 32) as u32 + 1);
    }
    out[31] ^= title.len() as u8;
    Address::new(out)
}

#[async_trait]
impl ProgramClient for FakeProgram {
    fn program_id(&self) -> Address {
        Address::new([42; 32])
    }

    fn entry_address(&self, owner: &Address, title: &str) -> JournalResult<Address> {
        Ok(derive(owner, title))
    }

    async fn program_status(&self) -> JournalResult<ProgramStatus> {
        self.calls.status.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        if !self.deployed {
            return Ok(ProgramStatus::missing(self.program_id()));
        }
        Ok(ProgramStatus {
            program_id: self.program_id(),
            deployed: true,
            metadata: Some(ProgramMetadata {
                owner: Address::new([2; 32]),
                executable: true,
                lamports: 1_141_440,
                data_len: 36,
            }),
        })
    }

    async fn all_entries(&self) -> JournalResult<Vec<EntryAccount>> {
        self.calls.all.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        let snapshot: Vec<EntryAccount> = self
            .entries
            .lock()
            .iter()
            .map(|(address, entry)| EntryAccount { address: *address, entry: entry.clone() })
            .collect();
        self.settle_read().await;
        Ok(snapshot)
    }

    async fn fetch_entry(&self, address: &Address) -> JournalResult<Option<JournalEntry>> {
        self.calls.fetch.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        let snapshot = self.entries.lock().get(address).cloned();
        self.settle_read().await;
        Ok(snapshot)
    }

    async fn create_journal_entry(&self, owner: &Address, title: &str, message: &str) -> JournalResult<TxSignature> {
        self.begin_write().await?;
        let address = derive(owner, title);
        let mut entries = self.entries.lock();
        if entries.contains_key(&address) {
            return Err(JournalError::network("custom program error: 0x0"));
        }
        entries.insert(address, JournalEntry { owner: *owner, title: title.into(), message: message.into() });
        Ok(self.signature())
    }

    async fn update_journal_entry(&self, owner: &Address, title: &str, message: &str) -> JournalResult<TxSignature> {
        self.begin_write().await?;
        let address = derive(owner, title);
        let mut entries = self.entries.lock();
        match entries.get_mut(&address) {
            Some(e) => {
                e.message = message.into();
                Ok(self.signature())
            }
            None => Err(JournalError::network("AccountNotInitialized")),
        }
    }

    async fn delete_journal_entry(&self, owner: &Address, title: &str) -> JournalResult<TxSignature> {
        self.begin_write().await?;
        let address = derive(owner, title);
        match self.entries.lock().remove(&address) {
            Some(_) => Ok(self.signature()),
            None => Err(JournalError::network("AccountNotInitialized")),
        }
    }
}

pub fn owner_a() -> Address {
    Address::new([0xA1; 32])
}

pub fn owner_b() -> Address {
    Address::new([0xB2; 32])
}
