//! Storage-key sanitization for work keys
//!
//! Canonical work keys contain path separators (`/works/OL45804W`) and are
//! not usable as document-path segments in the remote store. `storage_key`
//! percent-encodes them; the encoding is injective, so no two distinct
//! canonical keys ever map to the same storage key, and `canonical_id`
//! inverts it exactly. A bare `/` -> `_` substitution would collide with
//! keys that already contain underscores.

use thiserror::Error;

/// Error decoding a storage key back to its canonical form.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid storage key encoding: {0}")]
    InvalidEncoding(String),
}

/// Encode a canonical work key as a document-path-safe storage key.
pub fn storage_key(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Decode a storage key back to the canonical work key.
pub fn canonical_id(key: &str) -> Result<String, KeyError> {
    urlencoding::decode(key)
        .map(|cow| cow.into_owned())
        .map_err(|e| KeyError::InvalidEncoding(e.to_string()))
}
