use crate::error::BlobError;
use std::path::{Path, PathBuf};

/// Joins an already validated relative path onto the canonical `root` and
/// verifies the result cannot leave the root through symlinks.
///
/// The target itself may not exist yet (uploads); in that case the closest
/// existing ancestor is canonicalized and checked instead.
pub(crate) fn confine(root: &Path, relative: &Path) -> Result<PathBuf, BlobError> {
    let joined = root.join(relative);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(escape(&canonical, "Resolved path is outside the storage root")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => confine_ancestor(root, &joined),
        Err(e) => Err(BlobError::from_io(e, &joined, "Failed to resolve blob path")),
    }
}

fn confine_ancestor(root: &Path, joined: &Path) -> Result<PathBuf, BlobError> {
    let mut current = joined.parent();

    while let Some(path) = current {
        if path == root {
            return Ok(joined.to_path_buf());
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
                Ok(canonical) => {
                    Err(escape(&canonical, "Existing parent directory is a symlink outside root"))
                },
                Err(e) => Err(BlobError::from_io(e, path, "Failed to verify parent directory")),
            };
        }

        current = path.parent();
    }

    Err(escape(joined, "No parent directory found within the storage root"))
}

fn escape(path: &Path, reason: &'static str) -> BlobError {
    BlobError::InvalidName { message: path.display().to_string().into(), context: Some(reason.into()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_targets_resolve_inside_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();

        let resolved = confine(&root, Path::new("config/active.json")).unwrap();
        assert!(resolved.starts_with(&root));
        assert!(resolved.ends_with("config/active.json"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_container_is_rejected() {
        let outside = tempfile::tempdir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("config")).unwrap();

        let err = confine(&root, Path::new("config/active.json")).unwrap_err();
        assert!(matches!(err, BlobError::InvalidName { .. }));
    }
}
