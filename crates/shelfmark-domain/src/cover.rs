//! Cover image references and URL derivation

use serde::{Deserialize, Serialize};
use url::Url;

/// Reference to a cover image: a numeric cover id from the catalog, or a
/// direct URL (used when a list is rebuilt from remote entries, which only
/// persist the derived URL).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cover {
    Id(i64),
    Url(String),
}

/// Requested cover image size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

const COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Derive the cover image URL for a reference, or `None` when the reference
/// is missing or malformed. Pure, no failure mode.
pub fn cover_url(cover: Option<&Cover>, size: CoverSize) -> Option<Url> {
    match cover? {
        Cover::Id(id) => Url::parse(&format!("{}/{}-{}.jpg", COVERS_BASE, id, size.suffix())).ok(),
        Cover::Url(raw) => Url::parse(raw).ok(),
    }
}
