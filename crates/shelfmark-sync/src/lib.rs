//! shelfmark-sync: the reading-list synchronization engine.
//!
//! Keeps a user's categorized book lists consistent between an in-memory
//! local store (the source of truth for rendering) and a per-user remote
//! document store (the durable representation):
//!
//! - **ListStore**: in-memory lists with a change-notification channel
//! - **DocumentBackend / RemoteShelf**: remote persistence collaborator and
//!   the book <-> entry mapping on top of it
//! - **Library**: the orchestrator — optimistic local mutation, pull-on-
//!   sign-in rebuild, and explicit rollback hooks
//!
//! Mutations are applied locally first so the UI stays responsive; remote
//! failures are surfaced to the caller and never silently discard the local
//! change. On sign-in the local state is discarded and rebuilt entirely
//! from the remote store.

pub mod entry;
pub mod error;
pub mod library;
pub mod notify;
pub mod remote;
pub mod store;

#[cfg(feature = "native")]
pub mod http;

pub use entry::BookEntry;
pub use error::{RemoteError, StoreError, SyncError};
pub use library::{Library, ListTarget, ReplaceSummary, SyncOutcome};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use remote::{DocumentBackend, RemoteShelf};
pub use store::ListStore;

#[cfg(feature = "native")]
pub use http::HttpBackend;
