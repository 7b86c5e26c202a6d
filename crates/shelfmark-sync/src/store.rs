//! In-memory list store — the source of truth for rendering.
//!
//! Holds the three built-in lists (fixed order) followed by custom lists in
//! creation order. All reads are snapshots; all mutations notify the
//! [`ChangeNotifier`] exactly once per state change, after the internal
//! lock is released. The store is a derived, rebuildable cache: the remote
//! document store remains the durable representation.

use std::sync::Mutex;

use tracing::debug;

use shelfmark_domain::{normalized_list_name, Book, ListKind, ReadingList};

use crate::entry::BookEntry;
use crate::error::StoreError;
use crate::notify::{ChangeNotifier, SubscriptionId};

pub struct ListStore {
    lists: Mutex<Vec<ReadingList>>,
    notifier: ChangeNotifier,
}

impl ListStore {
    /// A store with fresh, empty built-in lists.
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(ReadingList::builtins()),
            notifier: ChangeNotifier::new(),
        }
    }

    // --- Change notification ---

    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.notifier.unsubscribe(id)
    }

    // --- Reads (snapshots) ---

    /// All lists: built-ins first in their fixed order, then custom lists
    /// in creation order.
    pub fn all_lists(&self) -> Vec<ReadingList> {
        self.lists.lock().unwrap().clone()
    }

    pub fn get_list(&self, list_id: &str) -> Option<ReadingList> {
        self.lists
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
    }

    /// Look up a built-in list by kind. `Custom` is ambiguous by design and
    /// always returns `None`; custom lists are addressed by id.
    pub fn get_list_by_kind(&self, kind: ListKind) -> Option<ReadingList> {
        if !kind.is_builtin() {
            return None;
        }
        self.lists
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.kind == kind)
            .cloned()
    }

    // --- Mutations ---

    /// Append `book` to the list unless a book with the same work key is
    /// already there. Returns whether the list changed; duplicates are a
    /// no-op, not an error, and fire no notification.
    pub fn add_book(&self, list_id: &str, book: Book) -> Result<bool, StoreError> {
        if book.id.trim().is_empty() {
            return Err(StoreError::InvalidBookId);
        }
        let added = {
            let mut lists = self
                .lists
                .lock()
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            let list = lists
                .iter_mut()
                .find(|l| l.id == list_id)
                .ok_or_else(|| StoreError::NotFound(list_id.to_string()))?;
            list.push_unique(book)
        };
        if added {
            self.notifier.notify();
        }
        Ok(added)
    }

    /// Remove the book with the given work key. An absent book — or an
    /// unknown list — is a no-op (`false`) and fires no notification;
    /// removals never fail on missing state.
    pub fn remove_book(&self, list_id: &str, book_id: &str) -> Result<bool, StoreError> {
        let removed = {
            let mut lists = self
                .lists
                .lock()
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            match lists.iter_mut().find(|l| l.id == list_id) {
                Some(list) => list.remove_by_id(book_id).is_some(),
                None => false,
            }
        };
        if removed {
            self.notifier.notify();
        }
        Ok(removed)
    }

    /// Rename a list. An empty trimmed name is a silent no-op; an unknown
    /// list id is an error.
    pub fn rename(&self, list_id: &str, new_name: &str) -> Result<(), StoreError> {
        let renamed = {
            let mut lists = self
                .lists
                .lock()
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            let list = lists
                .iter_mut()
                .find(|l| l.id == list_id)
                .ok_or_else(|| StoreError::NotFound(list_id.to_string()))?;
            match normalized_list_name(new_name) {
                Some(name) => {
                    list.name = name;
                    true
                }
                None => false,
            }
        };
        if renamed {
            self.notifier.notify();
        }
        Ok(())
    }

    /// Create a custom list with the given (trimmed, non-empty) name and
    /// append it after the existing lists. Returns a snapshot of the new
    /// list.
    pub fn create_custom(&self, name: &str) -> Result<ReadingList, StoreError> {
        let name = normalized_list_name(name).ok_or(StoreError::InvalidName)?;
        let list = ReadingList::custom(name);
        let snapshot = list.clone();
        self.lists
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .push(list);
        self.notifier.notify();
        Ok(snapshot)
    }

    /// Delete a custom list. Built-in lists always reject deletion.
    pub fn delete_list(&self, list_id: &str) -> Result<(), StoreError> {
        {
            let mut lists = self
                .lists
                .lock()
                .map_err(|e| StoreError::Storage(e.to_string()))?;
            let idx = lists
                .iter()
                .position(|l| l.id == list_id)
                .ok_or_else(|| StoreError::NotFound(list_id.to_string()))?;
            if lists[idx].kind.is_builtin() {
                return Err(StoreError::CannotDeleteBuiltin(lists[idx].name.clone()));
            }
            lists.remove(idx);
        }
        self.notifier.notify();
        Ok(())
    }

    /// Discard everything and rebuild from remote entries: fresh built-ins,
    /// each entry routed to its status's list (unknown/missing status goes
    /// to Want to Read), duplicates by work key dropped. Custom lists do
    /// not survive a rebuild; the remote store only holds built-in
    /// memberships. One notification fires for the whole batch. Returns the
    /// number of books restored.
    pub fn replace_all(&self, entries: &[BookEntry]) -> usize {
        let mut fresh = ReadingList::builtins();
        let mut restored = 0;
        for entry in entries {
            let kind = entry.kind();
            if let Some(list) = fresh.iter_mut().find(|l| l.kind == kind) {
                if list.push_unique(entry.to_book()) {
                    restored += 1;
                }
            }
        }
        *self.lists.lock().unwrap() = fresh;
        debug!(restored, total = entries.len(), "rebuilt lists from remote");
        self.notifier.notify();
        restored
    }

    /// Back to fresh, empty built-ins (the sign-out path). One notification.
    pub fn reset(&self) {
        *self.lists.lock().unwrap() = ReadingList::builtins();
        self.notifier.notify();
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn dune() -> Book {
        let mut b = Book::new("/works/OL45804W".to_string(), "Dune".to_string());
        b.authors = vec!["Frank Herbert".to_string()];
        b
    }

    #[test]
    fn test_new_store_has_empty_builtins() {
        let store = ListStore::new();
        let lists = store.all_lists();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0].kind, ListKind::CurrentlyReading);
        assert_eq!(lists[1].kind, ListKind::Finished);
        assert_eq!(lists[2].kind, ListKind::WantToRead);
        assert!(lists.iter().all(|l| l.books.is_empty()));
    }

    #[test]
    fn test_add_and_get() {
        let store = ListStore::new();
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        assert!(store.add_book(&want.id, dune()).unwrap());
        let list = store.get_list(&want.id).unwrap();
        assert_eq!(list.books.len(), 1);
        assert_eq!(list.books[0].id, "/works/OL45804W");
    }

    #[test]
    fn test_duplicate_add_is_noop_and_first_write_wins() {
        let store = ListStore::new();
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        assert!(store.add_book(&want.id, dune()).unwrap());
        let stale = Book::new("/works/OL45804W".to_string(), "Dune (stale)".to_string());
        assert!(!store.add_book(&want.id, stale).unwrap());
        let list = store.get_list(&want.id).unwrap();
        assert_eq!(list.books.len(), 1);
        assert_eq!(list.books[0].title, "Dune");
    }

    #[test]
    fn test_add_remove_round_trip() {
        let store = ListStore::new();
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        let before = store.get_list(&want.id).unwrap().books;
        store.add_book(&want.id, dune()).unwrap();
        assert!(store.remove_book(&want.id, "/works/OL45804W").unwrap());
        assert_eq!(store.get_list(&want.id).unwrap().books, before);
        // Removing again is a no-op
        assert!(!store.remove_book(&want.id, "/works/OL45804W").unwrap());
    }

    #[test]
    fn test_add_to_unknown_list() {
        let store = ListStore::new();
        assert!(matches!(
            store.add_book("no-such-list", dune()),
            Err(StoreError::NotFound(_))
        ));
        // Removals never fail on missing state
        assert!(!store.remove_book("no-such-list", "/works/OL45804W").unwrap());
    }

    #[test]
    fn test_add_empty_work_key_rejected() {
        let store = ListStore::new();
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        let bad = Book::new("  ".to_string(), "No Key".to_string());
        assert!(matches!(
            store.add_book(&want.id, bad),
            Err(StoreError::InvalidBookId)
        ));
    }

    #[test]
    fn test_get_list_by_kind_custom_is_none() {
        let store = ListStore::new();
        store.create_custom("Sci-fi").unwrap();
        assert!(store.get_list_by_kind(ListKind::Custom).is_none());
    }

    #[test]
    fn test_custom_lists_after_builtins_in_creation_order() {
        let store = ListStore::new();
        store.create_custom("Alpha").unwrap();
        store.create_custom("Beta").unwrap();
        let names: Vec<String> = store.all_lists().into_iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["Currently Reading", "Finished", "Want to Read", "Alpha", "Beta"]
        );
    }

    #[test]
    fn test_create_custom_rejects_blank_name() {
        let store = ListStore::new();
        assert!(matches!(
            store.create_custom("   "),
            Err(StoreError::InvalidName)
        ));
        assert_eq!(store.all_lists().len(), 3);
    }

    #[test]
    fn test_rename() {
        let store = ListStore::new();
        let list = store.create_custom("Alpha").unwrap();
        store.rename(&list.id, "  Beta  ").unwrap();
        assert_eq!(store.get_list(&list.id).unwrap().name, "Beta");
        // Blank rename is a silent no-op
        store.rename(&list.id, "   ").unwrap();
        assert_eq!(store.get_list(&list.id).unwrap().name, "Beta");
        // Unknown list is an error
        assert!(matches!(
            store.rename("no-such-list", "Gamma"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_builtin_rejected() {
        let store = ListStore::new();
        for list in store.all_lists().iter().filter(|l| l.kind.is_builtin()) {
            assert!(matches!(
                store.delete_list(&list.id),
                Err(StoreError::CannotDeleteBuiltin(_))
            ));
        }
        assert_eq!(store.all_lists().len(), 3);
    }

    #[test]
    fn test_delete_custom_succeeds() {
        let store = ListStore::new();
        let list = store.create_custom("Sci-fi").unwrap();
        store.delete_list(&list.id).unwrap();
        assert!(store.get_list(&list.id).is_none());
        assert_eq!(store.all_lists().len(), 3);
    }

    #[test]
    fn test_replace_all_empty_resets() {
        let store = ListStore::new();
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        store.add_book(&want.id, dune()).unwrap();
        store.create_custom("Sci-fi").unwrap();

        assert_eq!(store.replace_all(&[]), 0);
        let lists = store.all_lists();
        assert_eq!(lists.len(), 3);
        assert!(lists.iter().all(|l| l.books.is_empty()));
    }

    #[test]
    fn test_replace_all_routes_by_status() {
        let store = ListStore::new();
        let entries = vec![
            BookEntry {
                work_key: "/works/OL2W".to_string(),
                title: "Emma".to_string(),
                author: "Jane Austen".to_string(),
                cover_url: None,
                saved_at: chrono::Utc::now(),
                status: Some("Finished".to_string()),
            },
            BookEntry {
                work_key: "/works/OL3W".to_string(),
                title: "Persuasion".to_string(),
                author: "Jane Austen".to_string(),
                cover_url: None,
                saved_at: chrono::Utc::now(),
                status: Some("On The Pile".to_string()),
            },
        ];
        assert_eq!(store.replace_all(&entries), 2);
        let finished = store.get_list_by_kind(ListKind::Finished).unwrap();
        assert_eq!(finished.books.len(), 1);
        assert_eq!(finished.books[0].id, "/works/OL2W");
        // Unknown status lands in Want to Read
        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        assert_eq!(want.books.len(), 1);
        assert_eq!(want.books[0].id, "/works/OL3W");
    }

    #[test]
    fn test_replace_all_idempotent() {
        let store = ListStore::new();
        let entries = vec![BookEntry {
            work_key: "/works/OL2W".to_string(),
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            cover_url: None,
            saved_at: chrono::Utc::now(),
            status: Some("Finished".to_string()),
        }];
        store.replace_all(&entries);
        let first: Vec<(ListKind, Vec<String>)> = store
            .all_lists()
            .into_iter()
            .map(|l| (l.kind, l.books.into_iter().map(|b| b.id).collect()))
            .collect();
        store.replace_all(&entries);
        let second: Vec<(ListKind, Vec<String>)> = store
            .all_lists()
            .into_iter()
            .map(|l| (l.kind, l.books.into_iter().map(|b| b.id).collect()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_notification_counts() {
        let store = ListStore::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        store.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let want = store.get_list_by_kind(ListKind::WantToRead).unwrap();
        store.add_book(&want.id, dune()).unwrap(); // 1
        store.add_book(&want.id, dune()).unwrap(); // duplicate, no notify
        store.remove_book(&want.id, "/works/no-such").unwrap(); // absent, no notify
        store.replace_all(&[]); // 2: one for the whole batch
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscriber_can_reenter_store() {
        let store = Arc::new(ListStore::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&store);
        let c = Arc::clone(&seen);
        store.subscribe(move || {
            c.store(s.all_lists().len(), Ordering::SeqCst);
        });
        store.create_custom("Sci-fi").unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }
}
