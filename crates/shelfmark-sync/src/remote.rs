//! Remote persistence collaborator and the book <-> entry adapter.
//!
//! The backend is a per-user key/value document store addressed by path
//! (`users/{user_id}/books/{storage_key}`). Any document store satisfies
//! the trait; the engine ships an HTTP implementation behind the `native`
//! feature and tests against an in-memory fake.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use shelfmark_domain::{storage_key, Book, ListKind};

use crate::entry::BookEntry;
use crate::error::RemoteError;

/// User-provided document store. Implementations handle the actual
/// persistence (HTTP, cloud SDK, in-memory fake).
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Upsert the document at `path`. Writing the same document twice must
    /// be safe (idempotent upsert, not an append).
    async fn put(&self, path: &str, value: Value) -> Result<(), RemoteError>;

    /// Delete the document at `path`. Deleting a missing document is not an
    /// error.
    async fn delete(&self, path: &str) -> Result<(), RemoteError>;

    /// All documents under `prefix`; empty when none exist.
    async fn list_all(&self, prefix: &str) -> Result<Vec<Value>, RemoteError>;
}

fn books_prefix(user_id: &str) -> String {
    format!("users/{user_id}/books")
}

fn book_path(user_id: &str, book_id: &str) -> String {
    format!("users/{user_id}/books/{}", storage_key(book_id))
}

/// Per-user book storage on top of a [`DocumentBackend`].
pub struct RemoteShelf {
    backend: Arc<dyn DocumentBackend>,
}

impl RemoteShelf {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Upsert the entry for `book` under the user's collection, recording
    /// which list it belongs to. Safe to call twice with the same inputs.
    pub async fn save(
        &self,
        user_id: &str,
        book: &Book,
        kind: ListKind,
    ) -> Result<(), RemoteError> {
        let entry = BookEntry::from_book(book, kind);
        let value = serde_json::to_value(&entry)
            .map_err(|e| RemoteError::Backend(e.to_string()))?;
        let path = book_path(user_id, &book.id);
        self.backend.put(&path, value).await?;
        debug!(%path, "saved book entry");
        Ok(())
    }

    /// Delete the entry for `book_id`. Removing an entry that was never
    /// saved succeeds.
    pub async fn remove(&self, user_id: &str, book_id: &str) -> Result<(), RemoteError> {
        let path = book_path(user_id, book_id);
        self.backend.delete(&path).await?;
        debug!(%path, "removed book entry");
        Ok(())
    }

    /// Every saved entry for the user; empty for first-time users. A
    /// document that fails to decode is skipped and logged — one bad record
    /// never aborts the batch.
    pub async fn fetch_all(&self, user_id: &str) -> Result<Vec<BookEntry>, RemoteError> {
        let documents = self.backend.list_all(&books_prefix(user_id)).await?;
        let total = documents.len();
        let entries: Vec<BookEntry> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<BookEntry>(doc) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(user_id, error = %e, "skipping undecodable book entry");
                    None
                }
            })
            .collect();
        debug!(user_id, total, decoded = entries.len(), "fetched book entries");
        Ok(entries)
    }
}
