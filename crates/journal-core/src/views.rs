//! View states for journal front ends.
//!
//! Pure presentation: these types map repository results onto what a list,
//! a card or a form should show. The only logic here is input trimming and
//! the non-empty check that enables a submit control. Forms never reach the
//! repository when no wallet is connected or the input is invalid.

use std::sync::Arc;

use serde::Serialize;

use crate::client::ProgramClient;
use crate::errors::{JournalError, JournalResult};
use crate::model::{Address, EntryAccount, JournalEntry, ProgramStatus, TxSignature};
use crate::notify::Notifier;
use crate::repository::{EntryArgs, EntryRepository, MutationKind};
use crate::session::Session;
use crate::validate::is_submittable;

pub const CONNECT_PROMPT: &str = "Connect your wallet.";
pub const PROGRAM_MISSING: &str =
    "Program account not found. Make sure you have deployed the program and are on the correct cluster.";
pub const NO_ENTRIES: &str = "No entries found. Create one above to get started.";

/// State of a read query as seen by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> From<JournalResult<T>> for QueryState<T> {
    fn from(r: JournalResult<T>) -> Self {
        match r {
            Ok(v) => Self::Ready(v),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Coarse render state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderState {
    Disconnected,
    Loading,
    ProgramMissing,
    Empty,
    Populated,
    Error,
}

/// One entry as rendered in a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCard {
    pub address: Address,
    pub title: String,
    pub message: String,
    pub owner: Address,
    /// Update/delete controls are only offered on the owner's entries.
    pub editable: bool,
}

impl EntryCard {
    fn from_account(account: &EntryAccount, identity: Option<Address>) -> Self {
        Self {
            address: account.address,
            title: account.entry.title.clone(),
            message: account.entry.message.clone(),
            owner: account.entry.owner,
            editable: identity == Some(account.entry.owner),
        }
    }
}

/// The entry list. Listing needs no wallet: the session only decides which
/// cards are editable. Writes and single-entry cards require a connected
/// identity instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ListView {
    Loading,
    ProgramMissing { message: String },
    Empty { message: String },
    Populated { entries: Vec<EntryCard> },
    Error { message: String },
}

impl ListView {
    /// Program status gates the list: nothing is listed if it is not deployed.
    pub fn render(
        session: &Session,
        program: &QueryState<ProgramStatus>,
        entries: &QueryState<Arc<Vec<EntryAccount>>>,
    ) -> Self {
        match program {
            QueryState::Loading => return Self::Loading,
            QueryState::Failed(m) => return Self::Error { message: m.clone() },
            QueryState::Ready(status) if !status.deployed => {
                return Self::ProgramMissing { message: PROGRAM_MISSING.to_string() }
            }
            QueryState::Ready(_) => {}
        }

        match entries {
            QueryState::Loading => Self::Loading,
            QueryState::Failed(m) => Self::Error { message: m.clone() },
            QueryState::Ready(list) if list.is_empty() => Self::Empty { message: NO_ENTRIES.to_string() },
            QueryState::Ready(list) => Self::Populated {
                entries: list.iter().map(|a| EntryCard::from_account(a, session.identity)).collect(),
            },
        }
    }

    pub fn render_state(&self) -> RenderState {
        match self {
            Self::Loading => RenderState::Loading,
            Self::ProgramMissing { .. } => RenderState::ProgramMissing,
            Self::Empty { .. } => RenderState::Empty,
            Self::Populated { .. } => RenderState::Populated,
            Self::Error { .. } => RenderState::Error,
        }
    }
}

/// A single entry card backed by a fetch query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum EntryCardView {
    Disconnected { message: String },
    Loading,
    NotFound { address: Address },
    Ready { card: EntryCard },
    Error { message: String },
}

impl EntryCardView {
    pub fn render(session: &Session, address: Address, entry: &QueryState<Option<JournalEntry>>) -> Self {
        if !session.is_connected() {
            return Self::Disconnected { message: CONNECT_PROMPT.to_string() };
        }
        match entry {
            QueryState::Loading => Self::Loading,
            QueryState::Failed(m) => Self::Error { message: m.clone() },
            QueryState::Ready(None) => Self::NotFound { address },
            QueryState::Ready(Some(e)) => Self::Ready {
                card: EntryCard::from_account(
                    &EntryAccount { address, entry: e.clone() },
                    session.identity,
                ),
            },
        }
    }

    pub fn render_state(&self) -> RenderState {
        match self {
            Self::Disconnected { .. } => RenderState::Disconnected,
            Self::Loading => RenderState::Loading,
            Self::NotFound { .. } => RenderState::Empty,
            Self::Ready { .. } => RenderState::Populated,
            Self::Error { .. } => RenderState::Error,
        }
    }
}

/// What the submit control of a form should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitControl {
    /// No wallet: render a connect prompt instead of the form.
    ConnectPrompt,
    Disabled,
    Enabled,
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// No wallet connected; nothing was sent.
    ConnectPrompt,
    /// Input empty after trimming; nothing was sent.
    Invalid,
    /// The triggering control is disabled while a write is pending.
    Busy,
    Submitted(TxSignature),
    /// The write failed. The form keeps its values.
    Failed(JournalError),
}

fn control_for(session: &Session, valid: bool, pending: bool) -> SubmitControl {
    if !session.is_connected() {
        SubmitControl::ConnectPrompt
    } else if pending || !valid {
        SubmitControl::Disabled
    } else {
        SubmitControl::Enabled
    }
}

fn outcome(result: JournalResult<TxSignature>) -> FormOutcome {
    match result {
        Ok(sig) => FormOutcome::Submitted(sig),
        Err(JournalError::MutationPending { .. }) => FormOutcome::Busy,
        Err(e) => FormOutcome::Failed(e),
    }
}

/// The create form: title plus message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateEntryForm {
    pub title: String,
    pub message: String,
}

impl CreateEntryForm {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }

    pub fn is_valid(&self) -> bool {
        is_submittable(&self.title, &self.message)
    }

    pub fn control<C: ProgramClient, N: Notifier>(
        &self,
        repo: &EntryRepository<C, N>,
        session: &Session,
    ) -> SubmitControl {
        control_for(
            session,
            self.is_valid(),
            repo.is_pending(session, MutationKind::Create, &self.title),
        )
    }

    /// Clears the form on success, keeps it on failure.
    pub async fn submit<C: ProgramClient, N: Notifier>(
        &mut self,
        repo: &EntryRepository<C, N>,
        session: &Session,
    ) -> FormOutcome {
        let Some(owner) = session.identity else {
            return FormOutcome::ConnectPrompt;
        };
        if !self.is_valid() {
            return FormOutcome::Invalid;
        }
        let args = EntryArgs::new(self.title.clone(), self.message.clone(), owner);
        let out = outcome(repo.create_entry(session, args).await);
        if matches!(out, FormOutcome::Submitted(_)) {
            self.title.clear();
            self.message.clear();
        }
        out
    }
}

/// The per-card update form. The title is fixed by the entry being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEntryForm {
    title: String,
    pub message: String,
}

impl UpdateEntryForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), message: String::new() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_valid(&self) -> bool {
        is_submittable(&self.title, &self.message)
    }

    pub fn control<C: ProgramClient, N: Notifier>(
        &self,
        repo: &EntryRepository<C, N>,
        session: &Session,
    ) -> SubmitControl {
        control_for(
            session,
            self.is_valid(),
            repo.is_pending(session, MutationKind::Update, &self.title),
        )
    }

    /// Clears the message on success, keeps it on failure.
    pub async fn submit<C: ProgramClient, N: Notifier>(
        &mut self,
        repo: &EntryRepository<C, N>,
        session: &Session,
    ) -> FormOutcome {
        let Some(owner) = session.identity else {
            return FormOutcome::ConnectPrompt;
        };
        if !self.is_valid() {
            return FormOutcome::Invalid;
        }
        let args = EntryArgs::new(self.title.clone(), self.message.clone(), owner);
        let out = outcome(repo.update_entry(session, args).await);
        if matches!(out, FormOutcome::Submitted(_)) {
            self.message.clear();
        }
        out
    }
}

/// Delete button. Requires confirmation before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    title: String,
}

impl DeleteControl {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn control<C: ProgramClient, N: Notifier>(
        &self,
        repo: &EntryRepository<C, N>,
        session: &Session,
    ) -> SubmitControl {
        control_for(
            session,
            !self.title.trim().is_empty(),
            repo.is_pending(session, MutationKind::Delete, &self.title),
        )
    }

    /// Returns `Invalid` without a network call unless `confirmed`.
    pub async fn submit<C: ProgramClient, N: Notifier>(
        &self,
        repo: &EntryRepository<C, N>,
        session: &Session,
        confirmed: bool,
    ) -> FormOutcome {
        if !session.is_connected() {
            return FormOutcome::ConnectPrompt;
        }
        if !confirmed || self.title.trim().is_empty() {
            return FormOutcome::Invalid;
        }
        outcome(repo.delete_entry(session, &self.title).await)
    }
}
