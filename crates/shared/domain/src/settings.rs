use serde::Deserialize;
use std::path::PathBuf;

/// Settings of the `ragcfg` tool itself, loaded from `ragcfg.toml` and
/// `RAGCFG__*` environment variables.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub blob: BlobSettings,
    pub log: LogSettings,
}

/// Filesystem blob store location and behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlobSettings {
    pub root: PathBuf,
    pub compression: BlobCompression,
    /// Create the root directory when it is missing.
    pub create: bool,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobCompression {
    #[default]
    None,
    Lz4,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    /// Write log files as JSON lines.
    pub json: bool,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
    /// Extra filter directives, e.g. `ragcfg_blob=debug`.
    pub filter: Option<String>,
}

// --- Default ---

impl Default for BlobSettings {
    fn default() -> Self {
        Self { root: PathBuf::from("./blobs"), compression: BlobCompression::None, create: true }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None, filter: None }
    }
}
