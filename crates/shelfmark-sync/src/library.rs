//! The Library facade — orchestrates local mutation and remote sync.
//!
//! Constructed explicitly with its collaborators (no global state). Local
//! mutations are applied first (optimistic) so the UI can re-render
//! immediately; the remote write follows when a user id is supplied. A
//! remote failure is surfaced to the caller but never discards the local
//! change — the caller opts into rollback via `revert_add`/`revert_remove`.
//!
//! Sign-in is a barrier: the rebuild takes the exclusive side of a
//! `tokio::sync::RwLock` while every mutation takes the shared side, so a
//! `replace_all` never interleaves with in-flight adds and removes, and
//! concurrent sign-ins serialize. Remote writes for different books run
//! concurrently without coordination; two writes for the same book race
//! last-write-wins at the store, which is accepted by design.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use shelfmark_domain::{Book, ListKind, ReadingList};

use crate::error::{StoreError, SyncError};
use crate::notify::SubscriptionId;
use crate::remote::RemoteShelf;
use crate::store::ListStore;

/// Which list a mutation targets: a concrete list id (required for custom
/// lists) or a built-in kind.
#[derive(Clone, Debug)]
pub enum ListTarget {
    Id(String),
    Kind(ListKind),
}

impl From<ListKind> for ListTarget {
    fn from(kind: ListKind) -> Self {
        ListTarget::Kind(kind)
    }
}

/// How a mutation settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Applied locally and persisted remotely
    Committed,
    /// Applied locally; no user session, so no remote write was attempted
    LocalOnly,
    /// Local state already matched (duplicate add / absent remove); no
    /// remote call was made
    Unchanged,
}

/// Result of a sign-in rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplaceSummary {
    /// Entries fetched from the remote store (after decode skips)
    pub fetched: usize,
    /// Books actually restored into lists (duplicates dropped)
    pub restored: usize,
}

pub struct Library {
    store: Arc<ListStore>,
    remote: RemoteShelf,
    /// Mutations hold the read side; sign-in holds the write side.
    gate: RwLock<()>,
}

impl Library {
    pub fn new(store: Arc<ListStore>, remote: RemoteShelf) -> Self {
        Self {
            store,
            remote,
            gate: RwLock::new(()),
        }
    }

    // --- Read API (pass-through to the store) ---

    pub fn all_lists(&self) -> Vec<ReadingList> {
        self.store.all_lists()
    }

    pub fn get_list(&self, list_id: &str) -> Option<ReadingList> {
        self.store.get_list(list_id)
    }

    pub fn get_list_by_kind(&self, kind: ListKind) -> Option<ReadingList> {
        self.store.get_list_by_kind(kind)
    }

    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id)
    }

    // --- List management (local-only; custom lists are not synced) ---

    pub async fn create_custom(&self, name: &str) -> Result<ReadingList, SyncError> {
        let _permit = self.gate.read().await;
        Ok(self.store.create_custom(name)?)
    }

    pub async fn rename(&self, list_id: &str, new_name: &str) -> Result<(), SyncError> {
        let _permit = self.gate.read().await;
        Ok(self.store.rename(list_id, new_name)?)
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<(), SyncError> {
        let _permit = self.gate.read().await;
        Ok(self.store.delete_list(list_id)?)
    }

    // --- Book mutations ---

    /// Add `book` to the target list: local first, then the remote upsert
    /// when `user_id` is given. A duplicate short-circuits before any
    /// remote call. On a remote failure the local add is kept and the
    /// error is returned; `revert_add` undoes it if the caller chooses.
    pub async fn add_book(
        &self,
        target: ListTarget,
        book: Book,
        user_id: Option<&str>,
    ) -> Result<SyncOutcome, SyncError> {
        let _permit = self.gate.read().await;
        let list = self.resolve(&target)?;

        if !self.store.add_book(&list.id, book.clone())? {
            return Ok(SyncOutcome::Unchanged);
        }

        let Some(user) = user_id else {
            return Ok(SyncOutcome::LocalOnly);
        };

        if let Err(e) = self.remote.save(user, &book, list.kind).await {
            warn!(book = %book.id, error = %e, "remote save failed; keeping local add");
            return Err(e.into());
        }
        debug!(book = %book.id, list = %list.name, "book committed");
        Ok(SyncOutcome::Committed)
    }

    /// Remove the book with `book_id` from the list: local first, then the
    /// remote delete when `user_id` is given. An absent book
    /// short-circuits. On a remote failure the local removal stands.
    pub async fn remove_book(
        &self,
        list_id: &str,
        book_id: &str,
        user_id: Option<&str>,
    ) -> Result<SyncOutcome, SyncError> {
        let _permit = self.gate.read().await;

        if !self.store.remove_book(list_id, book_id)? {
            return Ok(SyncOutcome::Unchanged);
        }

        let Some(user) = user_id else {
            return Ok(SyncOutcome::LocalOnly);
        };

        if let Err(e) = self.remote.remove(user, book_id).await {
            warn!(book = %book_id, error = %e, "remote delete failed; keeping local removal");
            return Err(e.into());
        }
        Ok(SyncOutcome::Committed)
    }

    /// Explicit local rollback of an optimistic add whose remote write
    /// failed. Touches no remote state.
    pub async fn revert_add(&self, list_id: &str, book_id: &str) -> Result<(), SyncError> {
        let _permit = self.gate.read().await;
        self.store.remove_book(list_id, book_id)?;
        Ok(())
    }

    /// Explicit local rollback of an optimistic removal whose remote delete
    /// failed. Touches no remote state.
    pub async fn revert_remove(&self, list_id: &str, book: Book) -> Result<(), SyncError> {
        let _permit = self.gate.read().await;
        self.store.add_book(list_id, book)?;
        Ok(())
    }

    // --- Session transitions ---

    /// Pull every remote entry for `user_id` and rebuild local state from
    /// scratch. An empty remote set (first-time user) is valid and yields
    /// the three empty built-ins. Waits for in-flight mutations to drain
    /// before rebuilding.
    pub async fn sign_in(&self, user_id: &str) -> Result<ReplaceSummary, SyncError> {
        let _barrier = self.gate.write().await;
        let entries = self.remote.fetch_all(user_id).await?;
        let fetched = entries.len();
        let restored = self.store.replace_all(&entries);
        debug!(user_id, fetched, restored, "signed in");
        Ok(ReplaceSummary { fetched, restored })
    }

    /// Reset local state to fresh built-ins. Remote data is untouched.
    pub async fn sign_out(&self) {
        let _barrier = self.gate.write().await;
        self.store.reset();
        debug!("signed out");
    }

    fn resolve(&self, target: &ListTarget) -> Result<ReadingList, StoreError> {
        match target {
            ListTarget::Id(id) => self
                .store
                .get_list(id)
                .ok_or_else(|| StoreError::NotFound(id.clone())),
            ListTarget::Kind(kind) => self
                .store
                .get_list_by_kind(*kind)
                .ok_or_else(|| StoreError::NotFound(format!("{kind:?}"))),
        }
    }
}
