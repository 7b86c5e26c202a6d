//! Domain types for shelfmark, a reading-list manager backed by a per-user
//! remote document store:
//! - Book: one catalogued book, identified by its Open Library work key
//! - Cover: cover image reference (numeric cover id or direct URL)
//! - ListKind, ReadingList: the three built-in lists plus custom lists
//! - work_key: storage-key sanitization for document paths
//! - validation: list-name and book field validation

pub mod book;
pub mod cover;
pub mod list;
pub mod validation;
pub mod work_key;

pub use book::*;
pub use cover::*;
pub use list::*;
pub use validation::*;
pub use work_key::{canonical_id, storage_key, KeyError};
