use crate::error::{ConfigStoreError, ConfigStoreErrorExt};
use ragcfg_blob::{BlobStore, CONTENT_TYPE_JSON};
use ragcfg_domain::Config;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Container holding the pipeline configuration documents.
pub const CONFIG_CONTAINER_NAME: &str = "config";

/// Key of the document the pipeline runs with.
pub const ACTIVE_CONFIG_BLOB: &str = "active.json";

/// The built-in configuration used whenever no valid active document exists.
#[must_use]
pub fn default_config() -> Config {
    Config::default()
}

/// Decodes a stored document.
///
/// # Errors
/// [`ConfigStoreError::Malformed`] for bytes that are not JSON,
/// [`ConfigStoreError::Schema`] for JSON of the wrong shape.
pub fn parse_config(bytes: &[u8]) -> Result<Config, ConfigStoreError> {
    serde_json::from_slice(bytes).map_err(ConfigStoreError::from_decode)
}

/// Pretty JSON with two-space indentation, as written by the save operations.
///
/// # Errors
/// [`ConfigStoreError::Serialize`] when `value` cannot be represented as JSON.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ConfigStoreError> {
    serde_json::to_vec_pretty(value).map_err(|e| ConfigStoreError::from_encode(&e))
}

/// Reads and writes `config/active.json` through a [`BlobStore`].
///
/// Every call performs exactly one blob operation; nothing is cached.
#[derive(Debug, Clone)]
pub struct ConfigStore<B> {
    blobs: B,
}

impl<B: BlobStore> ConfigStore<B> {
    pub const fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub const fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Loads the active configuration, falling back to [`default_config`] on
    /// any failure. The failure is logged, never returned.
    pub async fn load_active_or_default(&self) -> Config {
        match self.load_active().await {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    error = %err,
                    container = CONFIG_CONTAINER_NAME,
                    key = ACTIVE_CONFIG_BLOB,
                    "Returning default config"
                );
                default_config()
            },
        }
    }

    /// Loads the active configuration without the fallback.
    ///
    /// Chunking rules whose overlap is not below their size are accepted
    /// and reported with a warning.
    ///
    /// # Errors
    /// [`ConfigStoreError::Storage`] when the download fails, otherwise see [`parse_config`].
    pub async fn load_active(&self) -> Result<Config, ConfigStoreError> {
        let bytes = self
            .blobs
            .download(CONFIG_CONTAINER_NAME, ACTIVE_CONFIG_BLOB)
            .await
            .context("Failed to download active configuration")?;

        let config = parse_config(&bytes)?;

        for (index, chunking) in config.inconsistent_chunking() {
            warn!(
                index,
                strategy = %chunking.chunking_strategy,
                size = chunking.chunk_size,
                overlap = chunking.chunk_overlap,
                "Chunking overlap is not smaller than chunk size"
            );
        }

        debug!(bytes = bytes.len(), chunking = config.chunking.len(), "Loaded active config");
        Ok(config)
    }

    /// Stores `config` as the active document, replacing any previous one.
    ///
    /// # Errors
    /// [`ConfigStoreError::Serialize`] or [`ConfigStoreError::Storage`].
    pub async fn save_as_active(&self, config: &Config) -> Result<(), ConfigStoreError> {
        self.save_document(config).await
    }

    /// Stores an arbitrary JSON mapping as the active document without
    /// checking it against [`Config`]. A later load of a mapping that does
    /// not match falls back to the default.
    ///
    /// # Errors
    /// [`ConfigStoreError::Serialize`] or [`ConfigStoreError::Storage`].
    pub async fn save_raw_as_active(&self, value: &serde_json::Value) -> Result<(), ConfigStoreError> {
        self.save_document(value).await
    }

    async fn save_document<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ConfigStoreError> {
        let document = to_document(value)?;

        self.blobs
            .upload(CONFIG_CONTAINER_NAME, ACTIVE_CONFIG_BLOB, &document, CONTENT_TYPE_JSON)
            .await
            .context("Failed to upload active configuration")?;

        info!(
            container = CONFIG_CONTAINER_NAME,
            key = ACTIVE_CONFIG_BLOB,
            bytes = document.len(),
            "Saved active config"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn syntax_and_truncation_are_malformed() {
        for bytes in [&b"{\"prompts\": "[..], b"not json", b"", b"\xff\xfe{}"] {
            let err = parse_config(bytes).unwrap_err();
            assert!(matches!(err, ConfigStoreError::Malformed { .. }), "{bytes:?} gave {err:?}");
        }
    }

    #[test]
    fn wrong_shapes_are_schema_errors() {
        for value in [json!([]), json!({}), json!({ "prompts": 1 })] {
            let bytes = serde_json::to_vec(&value).unwrap();
            let err = parse_config(&bytes).unwrap_err();
            assert!(matches!(err, ConfigStoreError::Schema { .. }), "{value} gave {err:?}");
        }
    }

    #[test]
    fn document_is_indented_with_two_spaces() {
        let bytes = to_document(&json!({ "logging": { "log_tokens": true } })).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n  \"logging\": {\n    \"log_tokens\": true\n  }\n}");
    }
}
