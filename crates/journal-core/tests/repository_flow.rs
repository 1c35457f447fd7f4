//! repository_flow.rs
//!
//! Drives `EntryRepository` against the in-memory program:
//! reads, writes, cache invalidation and the failure contract.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;

use common::{owner_a, owner_b, FakeProgram};
use journal_core::cache::QueryKey;
use journal_core::prelude::*;

type Repo = EntryRepository<Arc<FakeProgram>, Arc<MemoryNotifier>>;

fn setup(program: FakeProgram) -> (Repo, Arc<FakeProgram>, Arc<MemoryNotifier>) {
    let program = Arc::new(program);
    let notifier = Arc::new(MemoryNotifier::new());
    let repo = EntryRepository::new(program.clone(), notifier.clone());
    (repo, program, notifier)
}

fn session_a() -> Session {
    Session::connected(Cluster::devnet(), owner_a())
}

#[tokio::test]
async fn create_then_list_contains_entry() {
    let (repo, _program, notifier) = setup(FakeProgram::new());
    let s = session_a();

    repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await.unwrap();

    let list = repo.list_entries(&s).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(
        list[0].entry,
        JournalEntry { owner: owner_a(), title: "Hello".into(), message: "World".into() }
    );
    assert_matches!(notifier.notifications().as_slice(), [Notification::Transaction { .. }]);
}

#[tokio::test]
async fn successful_create_refetches_list_exactly_once() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let s = session_a();

    repo.list_entries(&s).await.unwrap();
    assert_eq!(program.calls.all(), 1);

    repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await.unwrap();
    assert_eq!(program.calls.all(), 2);

    // served from the refreshed cache
    let list = repo.list_entries(&s).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(program.calls.all(), 2);
}

#[tokio::test]
async fn update_changes_message_not_title() {
    let (repo, _program, _n) = setup(FakeProgram::new());
    let s = session_a();

    repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await.unwrap();
    // warm the per-entry cache so the update has to invalidate it
    let before = repo.fetch_entry_by_title(&s, &owner_a(), "Hello").await.unwrap().unwrap();
    assert_eq!(before.message, "World");

    repo.update_entry(&s, EntryArgs::new("Hello", "World2", owner_a())).await.unwrap();

    let after = repo.fetch_entry_by_title(&s, &owner_a(), "Hello").await.unwrap().unwrap();
    assert_eq!(after.title, "Hello");
    assert_eq!(after.message, "World2");
}

#[tokio::test]
async fn delete_removes_entry_from_list_and_fetch() {
    let (repo, _program, _n) = setup(FakeProgram::new());
    let s = session_a();

    repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await.unwrap();
    repo.create_entry(&s, EntryArgs::new("Other", "Keep", owner_a())).await.unwrap();
    assert!(repo.fetch_entry_by_title(&s, &owner_a(), "Hello").await.unwrap().is_some());

    repo.delete_entry(&s, "Hello").await.unwrap();

    let titles: Vec<String> = repo
        .list_entries(&s)
        .await
        .unwrap()
        .iter()
        .map(|a| a.entry.title.clone())
        .collect();
    assert_eq!(titles, vec!["Other".to_string()]);
    assert_eq!(repo.fetch_entry_by_title(&s, &owner_a(), "Hello").await.unwrap(), None);
}

#[tokio::test]
async fn rejected_create_notifies_and_returns_error() {
    let (repo, program, notifier) = setup(FakeProgram::new());
    let s = session_a();
    repo.list_entries(&s).await.unwrap();
    program.fail_writes("custom program error: 0x1");

    let err = repo
        .create_entry(&s, EntryArgs::new("Hello", "World", owner_a()))
        .await
        .unwrap_err();

    assert_eq!(err, JournalError::network("custom program error: 0x1"));
    assert_eq!(notifier.errors(), vec!["Error creating entry: custom program error: 0x1".to_string()]);
    // no refetch after a failed write
    assert_eq!(program.calls.all(), 1);
    assert_eq!(repo.mutation_status(MutationKind::Create), MutationStatus::Idle);
}

#[tokio::test]
async fn duplicate_title_surfaces_network_failure() {
    let (repo, _program, notifier) = setup(FakeProgram::new());
    let s = session_a();
    repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await.unwrap();

    let err = repo
        .create_entry(&s, EntryArgs::new("Hello", "Again", owner_a()))
        .await
        .unwrap_err();
    assert_matches!(err, JournalError::Network(_));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn same_title_for_different_owners_is_allowed() {
    let (repo, _program, _n) = setup(FakeProgram::new());
    let a = session_a();
    let b = Session::connected(Cluster::devnet(), owner_b());

    repo.create_entry(&a, EntryArgs::new("Hello", "from a", owner_a())).await.unwrap();
    repo.create_entry(&b, EntryArgs::new("Hello", "from b", owner_b())).await.unwrap();
    assert_eq!(repo.list_entries(&a).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_of_missing_entry_is_not_sent() {
    let (repo, program, notifier) = setup(FakeProgram::new());
    let s = session_a();

    let err = repo
        .update_entry(&s, EntryArgs::new("Ghost", "boo", owner_a()))
        .await
        .unwrap_err();
    assert_matches!(err, JournalError::NotFound(_));
    assert_eq!(program.calls.writes(), 0);
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn disconnected_session_blocks_writes() {
    let (repo, program, notifier) = setup(FakeProgram::new());
    let s = Session::disconnected(Cluster::devnet());

    assert_eq!(
        repo.create_entry(&s, EntryArgs::new("a", "b", owner_a())).await,
        Err(JournalError::NotConnected)
    );
    assert_eq!(repo.delete_entry(&s, "a").await, Err(JournalError::NotConnected));
    assert_eq!(program.calls.writes(), 0);
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn owner_must_match_connected_wallet() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let err = repo
        .create_entry(&session_a(), EntryArgs::new("a", "b", owner_b()))
        .await
        .unwrap_err();
    assert_matches!(err, JournalError::Validation(_));
    assert_eq!(program.calls.writes(), 0);
}

#[tokio::test]
async fn trimmed_values_are_submitted() {
    let (repo, _program, _n) = setup(FakeProgram::new());
    let s = session_a();
    repo.create_entry(&s, EntryArgs::new("  Hello  ", " World\n", owner_a())).await.unwrap();
    let e = repo.fetch_entry_by_title(&s, &owner_a(), "Hello").await.unwrap().unwrap();
    assert_eq!(e.title, "Hello");
    assert_eq!(e.message, "World");
}

#[tokio::test]
async fn read_failure_is_recoverable_and_not_cached() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let s = session_a();
    program.fail_reads("connection refused");

    assert_matches!(repo.list_entries(&s).await, Err(JournalError::Network(_)));
    assert!(!repo.cache().contains(&QueryKey::all_entries("devnet")));

    program.heal();
    assert!(repo.list_entries(&s).await.unwrap().is_empty());
    assert_eq!(program.calls.all(), 2);
}

#[tokio::test]
async fn list_failure_after_write_does_not_fail_the_write() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let s = session_a();
    program.fail_reads("rpc overloaded");

    let sig = repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await;
    assert!(sig.is_ok());
}

#[tokio::test]
async fn list_started_before_a_write_does_not_overwrite_the_refetch() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let s = session_a();
    // the first list call snapshots an empty program and settles late
    program.delay_next_read(Duration::from_millis(100));

    let (early, created) = tokio::join!(repo.list_entries(&s), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())).await
    });
    assert!(early.unwrap().is_empty());
    created.unwrap();

    let list = repo.list_entries(&s).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].entry.title, "Hello");
    assert_eq!(program.calls.all(), 2);
}

#[tokio::test]
async fn entry_read_started_before_an_update_is_not_cached() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let s = session_a();
    let address = program.seed(owner_a(), "Hello", "World");
    program.delay_next_read(Duration::from_millis(100));

    let (early, updated) = tokio::join!(repo.fetch_entry(&s, &address), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        repo.update_entry(&s, EntryArgs::new("Hello", "World2", owner_a())).await
    });
    assert_eq!(early.unwrap().unwrap().message, "World");
    updated.unwrap();

    let fresh = repo.fetch_entry(&s, &address).await.unwrap().unwrap();
    assert_eq!(fresh.message, "World2");
}

#[tokio::test]
async fn program_status_is_cached_per_cluster() {
    let (repo, program, _n) = setup(FakeProgram::new());
    let dev = session_a();
    let test = Session::connected(Cluster::testnet(), owner_a());

    assert!(repo.fetch_program_status(&dev).await.unwrap().deployed);
    repo.fetch_program_status(&dev).await.unwrap();
    assert_eq!(program.calls.status(), 1);

    repo.fetch_program_status(&test).await.unwrap();
    assert_eq!(program.calls.status(), 2);
}

#[tokio::test]
async fn require_deployed_reports_missing_program() {
    let (repo, _program, _n) = setup(FakeProgram::undeployed());
    let err = repo.require_deployed(&session_a()).await.unwrap_err();
    assert_matches!(err, JournalError::ProgramNotDeployed { .. });
}

#[tokio::test]
async fn identical_pending_write_is_rejected() {
    let (repo, program, _n) = setup(FakeProgram::slow(Duration::from_millis(50)));
    let s = session_a();

    let (first, second) = tokio::join!(
        repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())),
        repo.create_entry(&s, EntryArgs::new("Hello", "World", owner_a())),
    );

    assert!(first.is_ok());
    assert_matches!(second, Err(JournalError::MutationPending { kind: "create", .. }));
    assert_eq!(program.calls.writes(), 1);
    assert_eq!(repo.mutation_status(MutationKind::Create), MutationStatus::Idle);
}

#[tokio::test]
async fn independent_entries_update_concurrently() {
    let (repo, program, _n) = setup(FakeProgram::slow(Duration::from_millis(10)));
    let s = session_a();
    program.seed(owner_a(), "one", "1");
    program.seed(owner_a(), "two", "2");

    let (a, b) = tokio::join!(
        repo.update_entry(&s, EntryArgs::new("one", "uno", owner_a())),
        repo.update_entry(&s, EntryArgs::new("two", "dos", owner_a())),
    );
    assert!(a.is_ok() && b.is_ok());

    let messages: Vec<String> = repo
        .list_entries(&s)
        .await
        .unwrap()
        .iter()
        .map(|a| a.entry.message.clone())
        .collect();
    assert_eq!(messages, vec!["uno".to_string(), "dos".to_string()]);
}

#[tokio::test]
async fn cache_can_be_disabled() {
    let program = Arc::new(FakeProgram::new());
    let mut config = ClientConfig::default();
    config.cache.enabled = false;
    let repo = EntryRepository::with_config(program.clone(), MemoryNotifier::new(), &config);
    let s = session_a();

    repo.list_entries(&s).await.unwrap();
    repo.list_entries(&s).await.unwrap();
    assert_eq!(program.calls.all(), 2);
    assert!(repo.cache().is_empty());
}
