use ragcfg_blob::BlobError;
use serde_json::error::Category;
use std::borrow::Cow;

/// Errors from reading or writing the active configuration.
#[ragcfg_derive::ragcfg_error]
pub enum ConfigStoreError {
    /// Transport, not-found or permission failure from the blob store.
    #[error("Configuration storage error{}: {source}", format_context(.context))]
    Storage { source: BlobError, context: Option<Cow<'static, str>> },

    /// The document is not JSON: syntax error, truncated input or invalid UTF-8.
    #[error("Malformed configuration document{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Valid JSON of the wrong shape: missing field, wrong type or unknown strategy.
    #[error("Configuration does not match the schema{}: {source}", format_context(.context))]
    Schema { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Failed to serialize configuration{}: {message}", format_context(.context))]
    Serialize { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigStoreError {
    /// Splits a decoding failure into [`Self::Malformed`] and [`Self::Schema`].
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Schema { source: err, context: None },
            Category::Syntax | Category::Eof | Category::Io => {
                Self::Malformed { message: err.to_string().into(), context: None }
            },
        }
    }

    pub(crate) fn from_encode(err: &serde_json::Error) -> Self {
        Self::Serialize { message: err.to_string().into(), context: None }
    }

    /// `true` when the active document is absent (missing container or blob).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage { source, .. } if source.is_not_found())
    }
}
