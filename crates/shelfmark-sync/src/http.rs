//! HTTP document backend using reqwest.
//!
//! Speaks to a REST document store that maps paths to JSON documents:
//! `PUT {base}/{path}` upserts, `DELETE {base}/{path}` deletes (404 is
//! treated as already-deleted), `GET {base}/{prefix}` returns a JSON array
//! of the documents under the prefix. Auth is a bearer token supplied by
//! the host application.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::RemoteError;
use crate::remote::DocumentBackend;

pub struct HttpBackend {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn check_status(status: StatusCode) -> Result<(), RemoteError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RemoteError::PermissionDenied(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(RemoteError::Backend(format!("HTTP {status}")));
        }
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Unavailable(e.to_string())
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn put(&self, path: &str, value: Value) -> Result<(), RemoteError> {
        let response = self
            .request(self.client.put(self.url_for(path)).json(&value))
            .send()
            .await
            .map_err(transport_error)?;
        Self::check_status(response.status())
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        let response = self
            .request(self.client.delete(self.url_for(path)))
            .send()
            .await
            .map_err(transport_error)?;
        // Deleting a missing document is success (idempotent delete).
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check_status(response.status())
    }

    async fn list_all(&self, prefix: &str) -> Result<Vec<Value>, RemoteError> {
        let response = self
            .request(self.client.get(self.url_for(prefix)))
            .send()
            .await
            .map_err(transport_error)?;
        // An empty collection may not exist yet.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        Self::check_status(response.status())?;
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| RemoteError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::new("https://store.example.com/v1/");
        assert_eq!(
            backend.url_for("users/u1/books/%2Fworks%2FOL1W"),
            "https://store.example.com/v1/users/u1/books/%2Fworks%2FOL1W"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            HttpBackend::check_status(StatusCode::FORBIDDEN),
            Err(RemoteError::PermissionDenied(_))
        ));
        assert!(matches!(
            HttpBackend::check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(RemoteError::Backend(_))
        ));
        assert!(HttpBackend::check_status(StatusCode::OK).is_ok());
    }
}
