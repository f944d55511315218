//! Filesystem backend: one directory per container under a canonical root.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/<container>/<key>                 payload (optionally LZ4 framed)
//! <root>/<container>/.props/<key>.json     BlobProperties sidecar
//! ```

use crate::builder::FsBlobStoreBuilder;
use crate::error::{BlobError, BlobErrorExt};
use crate::maintenance::{self, TMP_MARKER};
use crate::names::{ContainerName, validate_key};
use crate::security;
use crate::store::{BlobProperties, BlobStore, DEFAULT_CONTENT_TYPE};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const PROPS_DIR: &str = ".props";

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    #[default]
    None,
    Lz4,
}

impl Compression {
    fn compress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    fn decompress(self, data: Vec<u8>) -> Result<Vec<u8>, BlobError> {
        match self {
            Self::None => Ok(data),
            Self::Lz4 => {
                lz4_flex::decompress_size_prepended(&data).context("Lz4 decompression failed")
            },
        }
    }
}

#[derive(Debug)]
pub struct FsBlobStoreInner {
    /// Canonical physical root; every resolved path must stay below it.
    pub(crate) root: PathBuf,
    pub(crate) compression: Compression,
    /// Source of unique upload temp file names.
    pub(crate) tmp_counter: AtomicU64,
}

/// A [`BlobStore`] persisted to the local filesystem.
///
/// Uploads use write-to-temp, `fsync`, rename, so an object is never observed
/// half written. Container names and keys are validated and every path is
/// confined to the root, including through symlinks. The handle is an `Arc`
/// and clones cheaply.
///
/// # Example
///
/// ```rust
/// use ragcfg_blob::{BlobError, BlobStore, FsBlobStore, CONTENT_TYPE_JSON};
///
/// #[tokio::main]
/// async fn main() -> Result<(), BlobError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let store = FsBlobStore::builder().root(tmp.path().join("blobs")).connect().await?;
///
///     store.upload("config", "active.json", b"{}", CONTENT_TYPE_JSON).await?;
///     assert_eq!(store.download("config", "active.json").await?, b"{}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    pub(crate) inner: Arc<FsBlobStoreInner>,
}

impl Deref for FsBlobStore {
    type Target = FsBlobStoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FsBlobStore {
    #[must_use = "The blob store is not opened until you call .connect()"]
    pub fn builder() -> FsBlobStoreBuilder {
        FsBlobStoreBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Physical location of `container/key`.
    ///
    /// # Errors
    /// [`BlobError::InvalidName`] for rejected names or paths escaping the root.
    pub fn resolve(&self, container: &str, key: &str) -> Result<PathBuf, BlobError> {
        let container = ContainerName::try_from(container)?;
        let key = validate_key(key)?;
        security::confine(&self.root, &Path::new(container.as_str()).join(key))
    }

    fn resolve_props(&self, container: &str, key: &str) -> Result<PathBuf, BlobError> {
        let container = ContainerName::try_from(container)?;
        let key = validate_key(key)?;
        let mut sidecar = Path::new(container.as_str()).join(PROPS_DIR).join(key).into_os_string();
        sidecar.push(".json");
        security::confine(&self.root, Path::new(&sidecar))
    }

    fn container_dir(&self, container: &str) -> Result<PathBuf, BlobError> {
        let container = ContainerName::try_from(container)?;
        Ok(self.root.join(container.as_str()))
    }

    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root).await;
    }

    async fn ensure_container(&self, container: &str) -> Result<(), BlobError> {
        let dir = self.container_dir(container)?;
        if dir_exists(&dir).await? {
            Ok(())
        } else {
            Err(BlobError::ContainerNotFound { message: container.to_owned().into(), context: None })
        }
    }

    /// Writes `data` to a fresh temp file next to `target` and syncs it.
    /// The temp file is removed again when writing fails.
    async fn stage(&self, target: &Path, data: &[u8]) -> Result<PathBuf, BlobError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::from_io(e, parent, "Failed to create directories"))?;
        }

        let temp = unique_tmp_path(target, &self.tmp_counter);

        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp)
            .await
            .map_err(|e| BlobError::from_io(e, &temp, "Temp creation failed"))?;

        let written = async {
            file.write_all(data).await.context("Write failed")?;
            file.sync_all().await.context("Hardware sync failed")
        }
        .await;
        drop(file);

        match written {
            Ok(()) => Ok(temp),
            Err(err) => {
                discard(&temp).await;
                Err(err)
            },
        }
    }
}

impl BlobStore for FsBlobStore {
    async fn download(&self, container: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.resolve(container, key)?;
        self.ensure_container(container).await?;

        let raw = fs::read(&path).await.map_err(|e| BlobError::from_io(e, &path, "Read failed"))?;
        debug!(container, key, bytes = raw.len(), "Blob downloaded");

        self.compression.decompress(raw)
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), BlobError> {
        let path = self.resolve(container, key)?;
        let props_path = self.resolve_props(container, key)?;

        let props = BlobProperties {
            content_type: content_type.to_owned(),
            content_length: data.len() as u64,
        };
        let encoded = serde_json::to_vec(&props).context("Encoding blob properties")?;

        let payload_tmp = self.stage(&path, &self.compression.compress(data)).await?;
        let props_tmp = match self.stage(&props_path, &encoded).await {
            Ok(temp) => temp,
            Err(err) => {
                discard(&payload_tmp).await;
                return Err(err);
            },
        };

        // Sidecar first, payload last: until the final rename the previous
        // payload stays live.
        if let Err(err) = commit(&props_tmp, &props_path).await {
            discard(&payload_tmp).await;
            return Err(err);
        }
        commit(&payload_tmp, &path).await?;

        debug!(container, key, bytes = data.len(), content_type, "Blob uploaded");
        Ok(())
    }

    async fn properties(&self, container: &str, key: &str) -> Result<BlobProperties, BlobError> {
        let path = self.resolve(container, key)?;
        self.ensure_container(container).await?;

        let meta =
            fs::metadata(&path).await.map_err(|e| BlobError::from_io(e, &path, "Stat failed"))?;

        let props_path = self.resolve_props(container, key)?;
        match fs::read(&props_path).await {
            Ok(raw) => serde_json::from_slice(&raw).context("Decoding blob properties"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(container, key, "Blob has no properties sidecar");
                Ok(BlobProperties {
                    content_type: DEFAULT_CONTENT_TYPE.to_owned(),
                    content_length: meta.len(),
                })
            },
            Err(e) => Err(BlobError::from_io(e, &props_path, "Properties read failed")),
        }
    }

    async fn exists(&self, container: &str, key: &str) -> Result<bool, BlobError> {
        let path = self.resolve(container, key)?;
        fs::try_exists(&path).await.map_err(|e| BlobError::from_io(e, &path, "Exists check failed"))
    }

    async fn delete(&self, container: &str, key: &str) -> Result<(), BlobError> {
        let path = self.resolve(container, key)?;
        fs::remove_file(&path).await.map_err(|e| BlobError::from_io(e, &path, "Delete failed"))?;

        let props_path = self.resolve_props(container, key)?;
        if let Err(e) = fs::remove_file(&props_path).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(container, key, error = %e, "Failed to delete blob properties");
        }

        debug!(container, key, "Blob deleted");
        Ok(())
    }
}

/// Renames a staged temp file over `target`, removing the temp file on failure.
async fn commit(temp: &Path, target: &Path) -> Result<(), BlobError> {
    let renamed = match fs::rename(temp, target).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            match fs::remove_file(target).await {
                Ok(()) => fs::rename(temp, target)
                    .await
                    .map_err(|e| BlobError::from_io(e, target, "Atomic swap failed")),
                Err(e) => Err(BlobError::from_io(e, target, "Failed to replace blob")),
            }
        },
        Err(err) => Err(BlobError::from_io(err, target, "Atomic swap failed")),
    };

    match renamed {
        Ok(()) => {
            if let Some(parent) = target.parent() {
                sync_dir(parent).await;
            }
            Ok(())
        },
        Err(err) => {
            discard(temp).await;
            Err(err)
        },
    }
}

async fn discard(temp: &Path) {
    if let Err(err) = fs::remove_file(temp).await
        && err.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %temp.display(), error = %err, "Failed to remove temp file");
    }
}

async fn dir_exists(dir: &Path) -> Result<bool, BlobError> {
    fs::try_exists(dir).await.map_err(|e| BlobError::from_io(e, dir, "Container check failed"))
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => warn!(path = %path.display(), error = %err, "Directory open failed"),
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("blob");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}
