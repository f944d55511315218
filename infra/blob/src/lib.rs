//! Container/key blob storage.
//!
//! The [`BlobStore`] trait is the boundary the configuration store talks to:
//! `download(container, key)` and `upload(container, key, bytes, content_type)`,
//! plus a few housekeeping calls. Two backends are provided:
//!
//! - **[`FsBlobStore`]**: a sandboxed directory tree with atomic replace
//!   (unique temp file + `fsync` + `rename`), optional transparent LZ4, a JSON
//!   properties sidecar per blob, and cleanup of abandoned temp files on connect.
//! - **[`MemoryBlobStore`]**: a shared in-process map for tests and embedding.
//!
//! Errors carry a coarse [`BlobErrorKind`] (`NotFound`, `Permission`,
//! `Transient`, ...) so callers can react without matching every variant.
//!
//! # Example
//!
//! ```rust
//! use ragcfg_blob::{BlobError, BlobStore, Compression, FsBlobStore, CONTENT_TYPE_JSON};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BlobError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let store = FsBlobStore::builder()
//!         .root(tmp.path().join("blobs"))
//!         .compression(Compression::Lz4)
//!         .connect()
//!         .await?;
//!
//!     store.upload("config", "active.json", br#"{"a":1}"#, CONTENT_TYPE_JSON).await?;
//!     let props = store.properties("config", "active.json").await?;
//!     assert_eq!(props.content_type, CONTENT_TYPE_JSON);
//!     Ok(())
//! }
//! ```

mod builder;
mod error;
mod fs;
mod maintenance;
mod memory;
mod names;
mod security;
mod store;

pub use builder::FsBlobStoreBuilder;
pub use error::{BlobError, BlobErrorExt, BlobErrorKind};
pub use fs::{Compression, FsBlobStore};
pub use memory::MemoryBlobStore;
pub use names::ContainerName;
pub use store::{BlobProperties, BlobStore, CONTENT_TYPE_JSON, DEFAULT_CONTENT_TYPE};
