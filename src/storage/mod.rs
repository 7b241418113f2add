//! Object storage for product images.

pub mod memory;
pub mod upload;

pub use memory::*;
pub use upload::*;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{instrument, warn};

use crate::domain::ProductImage;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Object already exists: {0}")]
    AlreadyExists(String),
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A bucket of objects addressed by path.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `path` without overwriting, returning the public URL.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    fn public_url(&self, path: &str) -> String;
}

/// Outcome of deleting one image during product removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCleanup {
    pub public_id: String,
    pub error: Option<String>,
}

impl ImageCleanup {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Deletes every image that has a `public_id`, one at a time.
///
/// Failures are logged and recorded but never stop the remaining deletes.
#[instrument(skip(store, images), fields(images = images.len()))]
pub async fn cleanup_images(store: &dyn ObjectStore, images: &[ProductImage]) -> Vec<ImageCleanup> {
    let mut report = Vec::new();
    for public_id in images.iter().filter_map(|image| image.public_id.as_deref()) {
        let error = match store.delete(public_id).await {
            Ok(()) => None,
            Err(e) => {
                warn!(public_id, error = %e, "Error deleting image");
                Some(e.to_string())
            }
        };
        report.push(ImageCleanup {
            public_id: public_id.to_string(),
            error,
        });
    }
    report
}
