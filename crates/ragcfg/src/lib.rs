//! Facade crate for the pipeline configuration store.
//! Re-exports the domain, kernel, blob and store crates and wires them
//! together from [`Settings`](domain::Settings).
//! Keep this crate thin: it composes other crates, it does not implement business logic.

pub use ragcfg_blob as blob;
pub use ragcfg_config_store as store;
pub use ragcfg_domain as domain;
pub use ragcfg_kernel as kernel;

pub use ragcfg_config_store::{ConfigStore, ConfigStoreError, default_config};
pub use ragcfg_domain::Config;

use ragcfg_blob::{BlobError, Compression, FsBlobStore};
use ragcfg_domain::{BlobCompression, BlobSettings};
use tracing::debug;

/// Connects the filesystem blob store described by `settings`.
///
/// # Errors
/// [`BlobError`] when the root is missing (and creation is disabled) or unusable.
pub async fn connect_blobs(settings: &BlobSettings) -> Result<FsBlobStore, BlobError> {
    let compression = match settings.compression {
        BlobCompression::None => Compression::None,
        BlobCompression::Lz4 => Compression::Lz4,
    };
    debug!(root = %settings.root.display(), ?compression, "Connecting blob store");

    FsBlobStore::builder()
        .root(&settings.root)
        .compression(compression)
        .create(settings.create)
        .connect()
        .await
}

/// Opens a [`ConfigStore`] over the filesystem blob store described by `settings`.
///
/// # Errors
/// See [`connect_blobs`].
pub async fn open(settings: &BlobSettings) -> Result<ConfigStore<FsBlobStore>, BlobError> {
    connect_blobs(settings).await.map(ConfigStore::new)
}
