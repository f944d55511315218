use crate::error::{BlobError, BlobErrorExt};
use crate::fs::{Compression, FsBlobStore, FsBlobStoreInner};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
struct FsBlobConfig {
    compression: Compression,
    create: bool,
}

impl Default for FsBlobConfig {
    fn default() -> Self {
        Self { compression: Compression::None, create: true }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

/// Typed builder for [`FsBlobStore`]; `connect` only exists once a root is set.
#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct FsBlobStoreBuilder<S: Sealed = NoRoot> {
    state: S,
    config: FsBlobConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> FsBlobStoreBuilder<S> {
    #[must_use = "Sets transparent compression for stored payloads"]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    #[must_use = "Sets whether a missing root directory is created on connect"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> FsBlobStoreBuilder<N> {
        FsBlobStoreBuilder { state, config: self.config }
    }
}

impl FsBlobStoreBuilder<NoRoot> {
    #[must_use = "Creates a new blob store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the directory that holds every container"]
    pub fn root(self, path: impl Into<PathBuf>) -> FsBlobStoreBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl FsBlobStoreBuilder<WithRoot> {
    /// Opens the blob store.
    ///
    /// Creates the root when `create(true)` (the default), canonicalizes it so
    /// every later path check compares physical locations, then purges upload
    /// temp files abandoned by a previous crash. Cleanup failures are logged
    /// and do not fail the connection.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::Io`] or [`BlobError::PermissionDenied`] when the
    /// root is missing (and `create` is false) or cannot be created/resolved.
    pub async fn connect(self) -> Result<FsBlobStore, BlobError> {
        let root = &self.state.0;

        if self.config.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to bootstrap blob root: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve blob root: {}", root.display()))?;

        info!(
            root = %canonical.display(),
            compression = ?self.config.compression,
            "Blob store connected"
        );

        let store = FsBlobStore {
            inner: Arc::new(FsBlobStoreInner {
                root: canonical,
                compression: self.config.compression,
                tmp_counter: AtomicU64::new(1),
            }),
        };

        store.purge_tmp().await;

        Ok(store)
    }
}
