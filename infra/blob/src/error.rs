use std::borrow::Cow;

/// Errors produced by every [`BlobStore`](crate::BlobStore) backend.
#[ragcfg_derive::ragcfg_error]
pub enum BlobError {
    #[error("Container not found{}: {message}", format_context(.context))]
    ContainerNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Blob not found{}: {message}", format_context(.context))]
    BlobNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Rejected container name or key, including any attempt to leave the storage root.
    #[error("Invalid blob address{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Permission denied{}: {message}", format_context(.context))]
    PermissionDenied { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Blob I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Blob properties are unreadable{}: {source}", format_context(.context))]
    Properties { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Decompression failure{}: {source}", format_context(.context))]
    Decompress { source: lz4_flex::block::DecompressError, context: Option<Cow<'static, str>> },
}

/// Coarse classification callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobErrorKind {
    NotFound,
    Permission,
    InvalidName,
    Transient,
    Corrupted,
}

impl BlobError {
    #[must_use]
    pub const fn kind(&self) -> BlobErrorKind {
        match self {
            Self::ContainerNotFound { .. } | Self::BlobNotFound { .. } => BlobErrorKind::NotFound,
            Self::PermissionDenied { .. } => BlobErrorKind::Permission,
            Self::InvalidName { .. } => BlobErrorKind::InvalidName,
            Self::Io { .. } => BlobErrorKind::Transient,
            Self::Properties { .. } | Self::Decompress { .. } => BlobErrorKind::Corrupted,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), BlobErrorKind::NotFound)
    }

    /// Maps an I/O failure on `target`, keeping `NotFound` and `PermissionDenied` distinct.
    pub(crate) fn from_io(err: std::io::Error, target: &std::path::Path, op: &'static str) -> Self {
        let message: Cow<'static, str> = target.display().to_string().into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::BlobNotFound { message, context: Some(op.into()) },
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied { message, context: Some(op.into()) }
            },
            _ => Self::Io { source: err, context: Some(format!("{op}: {message}").into()) },
        }
    }
}
