//! Shared test fakes: document backends and sample books

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use shelfmark_domain::{Book, Cover};
use shelfmark_sync::{DocumentBackend, RemoteError};

/// In-memory document store keyed by path.
#[derive(Default)]
pub struct MemoryBackend {
    docs: Mutex<BTreeMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.docs.lock().unwrap().contains_key(path)
    }

    /// Seed a document directly, bypassing the adapter.
    pub fn insert_raw(&self, path: &str, value: Value) {
        self.docs.lock().unwrap().insert(path.to_string(), value);
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn put(&self, path: &str, value: Value) -> Result<(), RemoteError> {
        self.docs.lock().unwrap().insert(path.to_string(), value);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        self.docs.lock().unwrap().remove(path);
        Ok(())
    }

    async fn list_all(&self, prefix: &str) -> Result<Vec<Value>, RemoteError> {
        let needle = format!("{prefix}/");
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, _)| path.starts_with(&needle))
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

/// Which failure a [`FailingBackend`] reports.
#[derive(Clone, Copy)]
pub enum FailureMode {
    Unavailable,
    PermissionDenied,
}

/// Backend whose every operation fails.
pub struct FailingBackend {
    mode: FailureMode,
}

impl FailingBackend {
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            mode: FailureMode::Unavailable,
        })
    }

    pub fn permission_denied() -> Arc<Self> {
        Arc::new(Self {
            mode: FailureMode::PermissionDenied,
        })
    }

    fn error(&self) -> RemoteError {
        match self.mode {
            FailureMode::Unavailable => {
                RemoteError::Unavailable("connection refused".to_string())
            }
            FailureMode::PermissionDenied => {
                RemoteError::PermissionDenied("wrong user".to_string())
            }
        }
    }
}

#[async_trait]
impl DocumentBackend for FailingBackend {
    async fn put(&self, _path: &str, _value: Value) -> Result<(), RemoteError> {
        Err(self.error())
    }

    async fn delete(&self, _path: &str) -> Result<(), RemoteError> {
        Err(self.error())
    }

    async fn list_all(&self, _prefix: &str) -> Result<Vec<Value>, RemoteError> {
        Err(self.error())
    }
}

pub fn dune() -> Book {
    let mut book = Book::new("/works/OL45804W".to_string(), "Dune".to_string());
    book.authors = vec!["Frank Herbert".to_string()];
    book.first_publish_year = Some(1965);
    book.cover = Some(Cover::Id(240727));
    book
}

pub fn emma() -> Book {
    let mut book = Book::new("/works/OL2W".to_string(), "Emma".to_string());
    book.authors = vec!["Jane Austen".to_string()];
    book.first_publish_year = Some(1815);
    book
}
