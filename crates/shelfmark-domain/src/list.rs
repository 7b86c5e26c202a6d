//! Reading lists and list kinds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Kind of a reading list. The three built-in kinds always exist exactly
/// once each; custom lists are user-created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListKind {
    CurrentlyReading,
    Finished,
    WantToRead,
    Custom,
}

impl ListKind {
    /// The built-in kinds in their fixed display order.
    pub fn builtins() -> [ListKind; 3] {
        [
            ListKind::CurrentlyReading,
            ListKind::Finished,
            ListKind::WantToRead,
        ]
    }

    pub fn is_builtin(self) -> bool {
        self != ListKind::Custom
    }

    /// Display label, also used as the persisted `status` value.
    /// Custom lists have no fixed label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            ListKind::CurrentlyReading => Some("Currently Reading"),
            ListKind::Finished => Some("Finished"),
            ListKind::WantToRead => Some("Want to Read"),
            ListKind::Custom => None,
        }
    }

    /// Map a persisted status label back to its built-in kind. Unrecognized
    /// or stale labels fall back to Want to Read rather than dropping the
    /// entry; this mirrors the original behavior and is covered by tests.
    pub fn from_label(label: &str) -> ListKind {
        match label {
            "Currently Reading" => ListKind::CurrentlyReading,
            "Finished" => ListKind::Finished,
            _ => ListKind::WantToRead,
        }
    }
}

/// An ordered, duplicate-free (by work key) list of books.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadingList {
    pub id: String,
    pub name: String,
    pub kind: ListKind,
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
}

impl ReadingList {
    fn new(name: String, kind: ListKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            kind,
            books: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// The three built-in lists, freshly created with empty membership, in
    /// the fixed display order. Used at cold start and whenever local state
    /// is rebuilt.
    pub fn builtins() -> Vec<ReadingList> {
        ListKind::builtins()
            .into_iter()
            .map(|kind| {
                ReadingList::new(
                    kind.label().expect("builtin kinds have labels").to_string(),
                    kind,
                )
            })
            .collect()
    }

    /// A new custom list. The caller validates the name first
    /// (see `validation::normalized_list_name`).
    pub fn custom(name: String) -> Self {
        ReadingList::new(name, ListKind::Custom)
    }

    /// Membership check, keyed by work key.
    pub fn contains(&self, book_id: &str) -> bool {
        self.books.iter().any(|b| b.id == book_id)
    }

    /// Append `book` unless a book with the same work key is already
    /// present. Returns whether the list changed. First write wins: an
    /// existing entry keeps its metadata.
    pub fn push_unique(&mut self, book: Book) -> bool {
        if self.contains(&book.id) {
            return false;
        }
        self.books.push(book);
        true
    }

    /// Remove the book with the given work key, returning it if present.
    pub fn remove_by_id(&mut self, book_id: &str) -> Option<Book> {
        let idx = self.books.iter().position(|b| b.id == book_id)?;
        Some(self.books.remove(idx))
    }
}
