use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStore, StorageError};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Process-local object store.
pub struct InMemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}
