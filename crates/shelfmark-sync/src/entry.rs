//! Remote storage shape for a saved book.
//!
//! One `BookEntry` document per (user, book). The canonical work key is
//! stored in the document itself; the percent-encoded form is only ever a
//! path segment, so rebuilding local state never has to invert the storage
//! key. Only the first author and the derived cover URL survive the trip —
//! the entry is a storage record, not a full metadata copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfmark_domain::{cover_url, Book, Cover, CoverSize, ListKind};

/// Placeholder author for books saved without author metadata.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Canonical work key (not the sanitized storage key)
    pub work_key: String,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub saved_at: DateTime<Utc>,
    /// Display label of the list the book was saved to
    pub status: Option<String>,
}

impl BookEntry {
    /// Build the storage record for `book` saved to a list of `kind`.
    pub fn from_book(book: &Book, kind: ListKind) -> Self {
        Self {
            work_key: book.id.clone(),
            title: book.title.clone(),
            author: book
                .first_author()
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            cover_url: cover_url(book.cover.as_ref(), CoverSize::Medium)
                .map(|u| u.to_string()),
            saved_at: Utc::now(),
            status: kind.label().map(str::to_string),
        }
    }

    /// Reconstruct the local book representation. Exact for the work key;
    /// lossy for the rest (single author, URL-only cover, no publish year).
    pub fn to_book(&self) -> Book {
        Book {
            id: self.work_key.clone(),
            title: self.title.clone(),
            authors: vec![self.author.clone()],
            first_publish_year: None,
            cover: self.cover_url.clone().map(Cover::Url),
        }
    }

    /// The built-in list this entry belongs to. Unknown or missing status
    /// labels fall back to Want to Read.
    pub fn kind(&self) -> ListKind {
        self.status
            .as_deref()
            .map(ListKind::from_label)
            .unwrap_or(ListKind::WantToRead)
    }
}
