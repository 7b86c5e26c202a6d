//! Book domain model

use serde::{Deserialize, Serialize};

use crate::cover::Cover;

/// A catalogued book.
///
/// Identity is the canonical work key (`id`) alone: two `Book` values with
/// the same key are the same book even when their metadata differs, so
/// membership checks never produce duplicate entries with stale metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Book {
    /// Canonical work key, e.g. `/works/OL45804W`
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub cover: Option<Cover>,
}

impl Book {
    /// Create a new book with required fields
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            authors: Vec::new(),
            first_publish_year: None,
            cover: None,
        }
    }

    /// First listed author, if any
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Book {}

impl std::hash::Hash for Book {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
