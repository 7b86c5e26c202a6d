//! Error types for the sync engine

use thiserror::Error;

/// Errors from the local list store. All of these are resolved
/// synchronously; none of them reaches the remote collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// List id (or built-in kind) does not resolve to a list
    #[error("List not found: {0}")]
    NotFound(String),

    /// Trimmed list name is empty
    #[error("List name must not be empty")]
    InvalidName,

    /// Book has an empty work key
    #[error("Book work key must not be empty")]
    InvalidBookId,

    /// Built-in lists cannot be deleted
    #[error("Cannot delete built-in list: {0}")]
    CannotDeleteBuiltin(String),

    /// Internal storage failure (poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors from the remote document backend.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport-level failure. Recoverable; the caller may retry the same
    /// operation (the engine itself never retries).
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    /// Unauthenticated or cross-user access. Fatal for the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Any other backend-reported failure
    #[error("Remote backend error: {0}")]
    Backend(String),
}

/// Top-level error for Library operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A remote failure after the local mutation was applied. The local
    /// state is kept; see `Library::revert_add` / `Library::revert_remove`.
    #[error("Sync error: {0}")]
    Remote(#[from] RemoteError),
}
