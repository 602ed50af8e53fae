//! Object Storage
//!
//! Binary attachment storage behind a narrow trait, with a local
//! filesystem implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors the object store can produce
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Object name is empty or contains path separators
    #[error("Invalid object name: {0}")]
    InvalidName(String),
}

/// Storage backend for uploaded binary objects
///
/// The service layer only ever stores an object and records the returned
/// URL, so this is the whole surface a backend has to provide.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under `name` and return the public URL it is served from
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, ObjectStoreError>;
}

/// Object store backed by a local directory
///
/// Files are written under `root` and served from `public_base_url`, which
/// the HTTP layer maps onto the same directory.
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    /// Create a store writing into `root` and serving from `public_base_url`
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url,
        }
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_root(&self) -> Result<(), ObjectStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        // Object names are single path components; anything else could
        // escape the storage root.
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(ObjectStoreError::InvalidName(name.to_string()));
        }

        let path = self.root.join(name);
        tokio::fs::write(&path, bytes).await?;

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            name
        ))
    }
}

/// Derive a unique, filesystem-safe object name for an upload
///
/// The millisecond timestamp prefix keeps repeated uploads of the same
/// filename from clobbering each other.
pub fn object_name(original: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", at.timestamp_millis(), sanitize_file_name(original))
}

/// Reduce a client-supplied filename to a safe single path component
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
