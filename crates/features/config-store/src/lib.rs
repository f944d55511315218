//! Active pipeline configuration.
//!
//! [`ConfigStore`] keeps one JSON document, `config/active.json`, in a
//! [`BlobStore`](ragcfg_blob::BlobStore). Loading never fails: a missing,
//! unreadable or invalid document yields [`default_config`] and a `warn!`.
//! Saving replaces the document and reports every error.
//!
//! ```rust
//! use ragcfg_blob::MemoryBlobStore;
//! use ragcfg_config_store::{ConfigStore, default_config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), ragcfg_config_store::ConfigStoreError> {
//! let store = ConfigStore::new(MemoryBlobStore::new());
//! assert_eq!(store.load_active_or_default().await, default_config());
//!
//! let mut config = default_config();
//! config.logging.log_tokens = false;
//! store.save_as_active(&config).await?;
//! assert_eq!(store.load_active_or_default().await, config);
//! # Ok(())
//! # }
//! ```
mod error;
mod store;

pub use crate::error::{ConfigStoreError, ConfigStoreErrorExt};
pub use crate::store::{
    ACTIVE_CONFIG_BLOB, CONFIG_CONTAINER_NAME, ConfigStore, default_config, parse_config, to_document,
};
