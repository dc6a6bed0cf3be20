//! The in-memory view of all notes.
//!
//! [`NoteController`] holds the current note list as observable state and
//! sequences every mutation with a full reload from the store. The list is
//! never patched locally: after a mutation resolves, it is whatever the
//! following reload fetched.
//!
//! Mutations are not serialized against each other. If two run at once,
//! the state ends up as whichever reload finished last.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::entity::{Note, NoteDraft};
use crate::error::{NotepadError, Result, StorageError};
use crate::search;
use crate::storage::{NoteStore, RemoteCollection};

/// Which controller operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Reload,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Reload => "reload",
        };
        f.write_str(name)
    }
}

/// The most recent storage failure, kept alongside the note list so a
/// renderer can show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerFailure {
    pub operation: Operation,
    pub message: String,
}

/// Result of submitting a draft through [`NoteController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new note was stored under this id.
    Created(String),
    Updated,
    /// A loaded note already has this title; nothing was written.
    DuplicateTitle,
}

pub struct NoteController<C> {
    store: Arc<NoteStore<C>>,
    notes: Arc<watch::Sender<Vec<Note>>>,
    failure: Arc<watch::Sender<Option<ControllerFailure>>>,
}

impl<C> Clone for NoteController<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notes: Arc::clone(&self.notes),
            failure: Arc::clone(&self.failure),
        }
    }
}

impl<C: RemoteCollection> NoteController<C> {
    /// Build a controller and load the initial list.
    ///
    /// A failed initial load leaves the list empty and is reported through
    /// [`NoteController::failure`].
    pub async fn new(store: NoteStore<C>) -> Self {
        let controller = Self::unloaded(store);
        // Recorded in the failure channel by reload().
        let _ = controller.reload().await;
        controller
    }

    /// Build a controller and load the initial list, failing if that load
    /// fails.
    pub async fn connect(store: NoteStore<C>) -> Result<Self> {
        let controller = Self::unloaded(store);
        controller.reload().await?;
        Ok(controller)
    }

    fn unloaded(store: NoteStore<C>) -> Self {
        let (notes, _) = watch::channel(Vec::new());
        let (failure, _) = watch::channel(None);
        Self {
            store: Arc::new(store),
            notes: Arc::new(notes),
            failure: Arc::new(failure),
        }
    }

    pub fn store(&self) -> &NoteStore<C> {
        &self.store
    }

    /// A copy of the current note list.
    pub fn notes(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }

    /// Watch the note list. Every reload replaces the whole value.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.notes.subscribe()
    }

    pub fn failure(&self) -> Option<ControllerFailure> {
        self.failure.borrow().clone()
    }

    pub fn subscribe_failures(&self) -> watch::Receiver<Option<ControllerFailure>> {
        self.failure.subscribe()
    }

    /// Replace the note list with a fresh fetch from the store.
    pub async fn reload(&self) -> Result<()> {
        match self.store.list_all().await {
            Ok(notes) => {
                self.notes.send_replace(notes);
                self.failure.send_replace(None);
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::Reload, e)),
        }
    }

    /// Store `candidate` as a new note, then reload. Returns the assigned id.
    ///
    /// Does not check for duplicate titles; see [`NoteController::submit`].
    pub async fn add_note(&self, candidate: Note) -> Result<String> {
        let id = self
            .store
            .create(&candidate)
            .await
            .map_err(|e| self.fail(Operation::Create, e))?;
        info!(id = %id, title = %candidate.title, "note added");

        self.reload().await?;
        Ok(id)
    }

    /// Overwrite the note with `note.id`, then reload.
    pub async fn update_note(&self, note: Note) -> Result<()> {
        self.store
            .update(&note)
            .await
            .map_err(|e| self.fail(Operation::Update, e))?;
        info!(id = %note.id, "note updated");

        self.reload().await
    }

    /// Remove the note with `id`, then reload.
    pub async fn delete_note(&self, id: &str) -> Result<()> {
        self.store
            .delete(id)
            .await
            .map_err(|e| self.fail(Operation::Delete, e))?;
        info!(id = %id, "note deleted");

        self.reload().await
    }

    /// Validate a draft and persist it.
    ///
    /// With `editing` set, the draft fully replaces that note. Without it, a
    /// new note is added unless a loaded note already has exactly the same
    /// title, in which case nothing happens. The title check runs against
    /// the last loaded list only, so concurrent writers can still race it.
    pub async fn submit(&self, draft: NoteDraft, editing: Option<&str>) -> Result<SubmitOutcome> {
        draft.validate()?;

        if let Some(id) = editing {
            self.update_note(draft.into_note(id)?).await?;
            return Ok(SubmitOutcome::Updated);
        }

        if self.has_title(&draft.title) {
            warn!(title = %draft.title, "a note with this title exists; add skipped");
            return Ok(SubmitOutcome::DuplicateTitle);
        }

        let id = self.add_note(draft.into_note(String::new())?).await?;
        Ok(SubmitOutcome::Created(id))
    }

    /// Whether any loaded note has exactly this title.
    pub fn has_title(&self, title: &str) -> bool {
        self.notes.borrow().iter().any(|n| n.title == title)
    }

    /// Loaded notes matching `query`; see [`search::matches`].
    pub fn filtered(&self, query: &str) -> Vec<Note> {
        search::filter_notes(&self.notes.borrow(), query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Find a loaded note by full id or unique id prefix.
    pub fn resolve(&self, id: &str) -> Result<Note> {
        let notes = self.notes.borrow();

        if let Some(note) = notes.iter().find(|n| n.id == id) {
            return Ok(note.clone());
        }

        let mut candidates = notes.iter().filter(|n| !id.is_empty() && n.id.starts_with(id));
        match (candidates.next(), candidates.next()) {
            (Some(note), None) => Ok(note.clone()),
            (Some(_), Some(_)) => Err(NotepadError::AmbiguousId(id.to_string())),
            (None, _) => Err(NotepadError::NoteNotFound(id.to_string())),
        }
    }

    fn fail(&self, operation: Operation, err: StorageError) -> NotepadError {
        warn!(operation = %operation, error = %err, "note operation failed");
        self.failure.send_replace(Some(ControllerFailure {
            operation,
            message: err.to_string(),
        }));
        err.into()
    }
}
