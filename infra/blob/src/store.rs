use crate::error::BlobError;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Content type recorded when a blob is uploaded without a more specific one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for JSON documents.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Metadata stored alongside every blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    pub content_type: String,
    /// Length of the uploaded payload, before any backend compression.
    pub content_length: u64,
}

/// Container/key object storage.
///
/// Containers are flat, named buckets; keys are relative, `/`-separated paths
/// inside a container. Uploads replace the previous object as a whole, so a
/// concurrent reader sees either the old or the new payload.
///
/// Backends shipped with this crate:
/// * [`FsBlobStore`](crate::FsBlobStore) persists to a sandboxed directory tree.
/// * [`MemoryBlobStore`](crate::MemoryBlobStore) keeps everything in process memory.
pub trait BlobStore: Send + Sync {
    /// Fetches the full payload of `container/key`.
    ///
    /// # Errors
    /// [`BlobError::ContainerNotFound`] or [`BlobError::BlobNotFound`] when the
    /// object is absent, [`BlobError::Io`] for transport failures.
    fn download(
        &self,
        container: &str,
        key: &str,
    ) -> impl Future<Output = Result<Vec<u8>, BlobError>> + Send;

    /// Writes `data` to `container/key`, creating the container when needed and
    /// replacing any previous object.
    ///
    /// # Errors
    /// [`BlobError::PermissionDenied`] or [`BlobError::Io`] when the write fails.
    fn upload(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> impl Future<Output = Result<(), BlobError>> + Send;

    /// Returns the stored [`BlobProperties`].
    ///
    /// # Errors
    /// Same not-found semantics as [`BlobStore::download`].
    fn properties(
        &self,
        container: &str,
        key: &str,
    ) -> impl Future<Output = Result<BlobProperties, BlobError>> + Send;

    /// # Errors
    /// Only for invalid addresses or I/O failures; a missing blob is `Ok(false)`.
    fn exists(
        &self,
        container: &str,
        key: &str,
    ) -> impl Future<Output = Result<bool, BlobError>> + Send;

    /// # Errors
    /// [`BlobError::BlobNotFound`] when there is nothing to delete.
    fn delete(&self, container: &str, key: &str)
    -> impl Future<Output = Result<(), BlobError>> + Send;
}
