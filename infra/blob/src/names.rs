use crate::error::BlobError;
use crate::maintenance::TMP_MARKER;
use std::fmt;
use std::path::{Component, Path};

const MIN_CONTAINER_LEN: usize = 3;
const MAX_CONTAINER_LEN: usize = 63;
const MAX_KEY_LEN: usize = 1024;

/// A validated container name.
///
/// Follows the usual cloud blob rules: 3 to 63 characters of lowercase ASCII
/// letters, digits and single hyphens, starting and ending with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl TryFrom<&str> for ContainerName {
    type Error = BlobError;

    fn try_from(value: &str) -> Result<Self, BlobError> {
        let invalid = |reason: &'static str| BlobError::InvalidName {
            message: value.to_owned().into(),
            context: Some(reason.into()),
        };

        if !(MIN_CONTAINER_LEN..=MAX_CONTAINER_LEN).contains(&value.len()) {
            return Err(invalid("Container name must be 3-63 characters long"));
        }
        if !value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return Err(invalid("Container name may only contain a-z, 0-9 and '-'"));
        }
        if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(invalid("Container name has a misplaced hyphen"));
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ContainerName {
    type Error = BlobError;

    fn try_from(value: String) -> Result<Self, BlobError> {
        Self::try_from(value.as_str())
    }
}

impl ContainerName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContainerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks that `key` is a relative, forward-slash path with no hidden or
/// parent segments. Hidden segments are reserved for backend bookkeeping.
pub(crate) fn validate_key(key: &str) -> Result<&Path, BlobError> {
    let invalid = |reason: &'static str| BlobError::InvalidName {
        message: key.to_owned().into(),
        context: Some(reason.into()),
    };

    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(invalid("Blob key must be 1-1024 bytes long"));
    }
    if key.contains('\\') || key.ends_with('/') {
        return Err(invalid("Blob key must be a '/'-separated file path"));
    }
    if key.contains(TMP_MARKER) {
        return Err(invalid("Blob key uses a reserved upload marker"));
    }

    for segment in key.split('/') {
        if segment.is_empty() {
            return Err(invalid("Blob key must be relative with no empty segments"));
        }
        if segment == "." || segment == ".." {
            return Err(invalid("Blob key may not contain '.' or '..' segments"));
        }
        if segment.starts_with('.') {
            return Err(invalid("Blob key segments may not be hidden"));
        }
    }

    let path = Path::new(key);
    if path.is_absolute() || path.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(invalid("Blob key must be relative"));
    }

    Ok(path)
}
