//! Change notification for the list store.
//!
//! Listeners carry no payload: a notification means "list state changed",
//! and consumers re-read through the store's snapshot API. Listeners are
//! snapshotted before invocation and called after the registry lock is
//! released, so a callback may re-enter the store or unsubscribe itself
//! without deadlocking. A listener removed during a notification round is
//! still called in that round; one added during a round is not.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Identifies a registered listener; pass to [`ChangeNotifier::unsubscribe`].
pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Registry of "state changed" callbacks with synchronous dispatch.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register `callback`, returning an id usable with `unsubscribe`.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove the listener with the given id. Safe to call twice.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|(lid, _)| *lid != id);
    }

    /// Invoke every currently registered listener.
    pub fn notify(&self) {
        let snapshot: Vec<Listener> = {
            let guard = self.listeners.lock().unwrap();
            guard.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for cb in snapshot {
            cb();
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
