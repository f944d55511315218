use crate::error::BlobError;
use crate::names::{ContainerName, validate_key};
use crate::store::{BlobProperties, BlobStore};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct MemoryBlob {
    data: Arc<[u8]>,
    content_type: String,
}

type Containers = HashMap<ContainerName, HashMap<String, MemoryBlob>>;

/// A process-local [`BlobStore`].
///
/// Applies the same name and key rules as the filesystem backend, so code
/// exercised against it behaves the same in production. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    containers: Arc<RwLock<Containers>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container; a no-op when it already exists.
    ///
    /// # Errors
    /// [`BlobError::InvalidName`] for a rejected container name.
    pub fn create_container(&self, container: &str) -> Result<(), BlobError> {
        let name = ContainerName::try_from(container)?;
        self.containers.write().entry(name).or_default();
        Ok(())
    }

    /// Number of blobs across all containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.read().values().map(HashMap::len).sum()
    }

    fn address(container: &str, key: &str) -> Result<(ContainerName, String), BlobError> {
        let name = ContainerName::try_from(container)?;
        validate_key(key)?;
        Ok((name, key.to_owned()))
    }

    fn get(&self, container: &str, key: &str) -> Result<MemoryBlob, BlobError> {
        let (name, key) = Self::address(container, key)?;
        let guard = self.containers.read();
        let blobs = guard.get(&name).ok_or_else(|| BlobError::ContainerNotFound {
            message: name.to_string().into(),
            context: None,
        })?;
        blobs.get(&key).cloned().ok_or_else(|| BlobError::BlobNotFound {
            message: format!("{name}/{key}").into(),
            context: None,
        })
    }
}

impl BlobStore for MemoryBlobStore {
    async fn download(&self, container: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        self.get(container, key).map(|blob| blob.data.to_vec())
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), BlobError> {
        let (name, key) = Self::address(container, key)?;
        let blob = MemoryBlob { data: Arc::from(data), content_type: content_type.to_owned() };
        self.containers.write().entry(name).or_default().insert(key, blob);
        Ok(())
    }

    async fn properties(&self, container: &str, key: &str) -> Result<BlobProperties, BlobError> {
        self.get(container, key).map(|blob| BlobProperties {
            content_type: blob.content_type,
            content_length: blob.data.len() as u64,
        })
    }

    async fn exists(&self, container: &str, key: &str) -> Result<bool, BlobError> {
        match self.get(container, key) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn delete(&self, container: &str, key: &str) -> Result<(), BlobError> {
        let (name, key) = Self::address(container, key)?;
        self.containers
            .write()
            .get_mut(&name)
            .and_then(|blobs| blobs.remove(&key))
            .map(|_| ())
            .ok_or_else(|| BlobError::BlobNotFound {
                message: format!("{name}/{key}").into(),
                context: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CONTENT_TYPE_JSON;

    #[tokio::test]
    async fn upload_creates_container_and_replaces_blob() {
        let store = MemoryBlobStore::new();
        store.upload("config", "active.json", b"{\"v\":1}", CONTENT_TYPE_JSON).await.unwrap();
        store.upload("config", "active.json", b"{\"v\":2}", CONTENT_TYPE_JSON).await.unwrap();

        assert_eq!(store.download("config", "active.json").await.unwrap(), b"{\"v\":2}");
        assert_eq!(store.len(), 1);

        let props = store.properties("config", "active.json").await.unwrap();
        assert_eq!(props.content_type, CONTENT_TYPE_JSON);
        assert_eq!(props.content_length, 7);
    }

    #[tokio::test]
    async fn missing_container_and_missing_blob_are_distinct() {
        let store = MemoryBlobStore::new();
        let err = store.download("config", "active.json").await.unwrap_err();
        assert!(matches!(err, BlobError::ContainerNotFound { .. }));

        store.create_container("config").unwrap();
        let err = store.download("config", "active.json").await.unwrap_err();
        assert!(matches!(err, BlobError::BlobNotFound { .. }));
        assert!(!store.exists("config", "active.json").await.unwrap());
    }

    #[tokio::test]
    async fn clones_share_state_and_delete_reports_missing() {
        let store = MemoryBlobStore::new();
        let other = store.clone();
        store.upload("config", "active.json", b"{}", CONTENT_TYPE_JSON).await.unwrap();

        other.delete("config", "active.json").await.unwrap();
        assert!(!store.exists("config", "active.json").await.unwrap());
        assert!(store.delete("config", "active.json").await.unwrap_err().is_not_found());
    }
}
