use ragcfg_kernel::domain::{BlobCompression, Settings};
use ragcfg_kernel::{SettingsError, load_settings, load_with_vars};
use serial_test::serial;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_settings(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("ragcfg.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"
[blob]
root = "/srv/blobs"
compression = "lz4"

[log]
level = "debug"
json = true
"#,
    );

    let settings = load_settings(Some(&path)).unwrap();
    assert_eq!(settings.blob.root, PathBuf::from("/srv/blobs"));
    assert_eq!(settings.blob.compression, BlobCompression::Lz4);
    assert!(settings.blob.create, "unset keys keep their default");
    assert_eq!(settings.log.level, "debug");
    assert!(settings.log.json);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "[blob]\nroot = \"/srv/blobs\"\n");
    let vars = HashMap::from([
        ("RAGCFG__BLOB__ROOT".to_owned(), "/mnt/override".to_owned()),
        ("RAGCFG__BLOB__CREATE".to_owned(), "false".to_owned()),
        ("OTHER__BLOB__ROOT".to_owned(), "/ignored".to_owned()),
    ]);

    let settings: Settings = load_with_vars(Some(&path), vars).unwrap();
    assert_eq!(settings.blob.root, PathBuf::from("/mnt/override"));
    assert!(!settings.blob.create);
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_settings(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, SettingsError::Config { context: Some(_), .. }));
}

#[test]
#[serial]
fn unknown_compression_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "[blob]\ncompression = \"zstd\"\n");
    assert!(load_settings(Some(&path)).is_err());
}
