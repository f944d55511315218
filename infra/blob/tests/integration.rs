use ragcfg_blob::*;
use tempfile::TempDir;

async fn connect(temp: &TempDir) -> FsBlobStore {
    FsBlobStore::builder().root(temp.path().join("blobs")).connect().await.unwrap()
}

#[tokio::test]
async fn test_traversal_and_bad_names_rejected() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    assert!(store.resolve("config", "../etc/passwd").is_err());
    assert!(store.resolve("config", "a/../../b").is_err());
    assert!(store.resolve("../config", "active.json").is_err());
    assert!(store.resolve("Config", "active.json").is_err());

    let err = store.upload("config", "/abs.json", b"x", CONTENT_TYPE_JSON).await.unwrap_err();
    assert_eq!(err.kind(), BlobErrorKind::InvalidName);
}

#[tokio::test]
async fn test_upload_download_roundtrip_uncompressed() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    let payload = br#"{"logging":{"log_tokens":true}}"#;
    store.upload("config", "active.json", payload, CONTENT_TYPE_JSON).await.unwrap();
    assert!(store.exists("config", "active.json").await.unwrap());

    assert_eq!(store.download("config", "active.json").await.unwrap(), payload);

    let on_disk = std::fs::read(store.resolve("config", "active.json").unwrap()).unwrap();
    assert_eq!(on_disk, payload, "uncompressed payload is stored verbatim");
}

#[tokio::test]
async fn test_upload_download_roundtrip_compressed() {
    let temp = TempDir::new().unwrap();
    let store = FsBlobStore::builder()
        .root(temp.path())
        .compression(Compression::Lz4)
        .connect()
        .await
        .unwrap();

    let payload = vec![b'a'; 4096];
    store.upload("config", "big.json", &payload, CONTENT_TYPE_JSON).await.unwrap();

    assert_eq!(store.download("config", "big.json").await.unwrap(), payload);

    let props = store.properties("config", "big.json").await.unwrap();
    assert_eq!(props.content_length, 4096, "length reports the logical payload size");
}

#[tokio::test]
async fn test_properties_keep_content_type() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "active.json", b"{}", CONTENT_TYPE_JSON).await.unwrap();
    store.upload("config", "notes.bin", b"\x00\x01", DEFAULT_CONTENT_TYPE).await.unwrap();

    let json = store.properties("config", "active.json").await.unwrap();
    assert_eq!(json, BlobProperties { content_type: CONTENT_TYPE_JSON.to_owned(), content_length: 2 });

    let bin = store.properties("config", "notes.bin").await.unwrap();
    assert_eq!(bin.content_type, DEFAULT_CONTENT_TYPE);
}

#[tokio::test]
async fn test_upload_overwrites_previous_blob() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "active.json", b"first", CONTENT_TYPE_JSON).await.unwrap();
    store.upload("config", "active.json", b"second", CONTENT_TYPE_JSON).await.unwrap();

    assert_eq!(store.download("config", "active.json").await.unwrap(), b"second");
}

#[tokio::test]
async fn test_containers_are_isolated() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "active.json", b"a", CONTENT_TYPE_JSON).await.unwrap();
    store.upload("staging", "active.json", b"b", CONTENT_TYPE_JSON).await.unwrap();

    assert_eq!(store.download("config", "active.json").await.unwrap(), b"a");
    assert_eq!(store.download("staging", "active.json").await.unwrap(), b"b");
}

#[tokio::test]
async fn test_missing_container_then_missing_blob() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    let err = store.download("config", "active.json").await.unwrap_err();
    assert!(matches!(err, BlobError::ContainerNotFound { .. }), "got {err:?}");
    assert_eq!(err.kind(), BlobErrorKind::NotFound);

    store.upload("config", "other.json", b"{}", CONTENT_TYPE_JSON).await.unwrap();
    let err = store.download("config", "active.json").await.unwrap_err();
    assert!(matches!(err, BlobError::BlobNotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_delete_and_exists() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "history/old.json", b"x", CONTENT_TYPE_JSON).await.unwrap();
    assert!(store.exists("config", "history/old.json").await.unwrap());

    store.delete("config", "history/old.json").await.unwrap();
    assert!(!store.exists("config", "history/old.json").await.unwrap());
    assert!(store.delete("config", "history/old.json").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_connect_without_create_requires_root() {
    let temp = TempDir::new().unwrap();
    let result = FsBlobStore::builder().root(temp.path().join("absent")).create(false).connect().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_no_temp_files_left_after_upload() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "active.json", b"{}", CONTENT_TYPE_JSON).await.unwrap();

    assert_eq!(temp_files_in(&store.root().join("config")), 0);
}

fn temp_files_in(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(".blobtmp."))
        .count()
}

#[tokio::test]
async fn test_failed_sidecar_keeps_previous_payload() {
    let temp = TempDir::new().unwrap();
    let store = connect(&temp).await;

    store.upload("config", "active.json", b"first", CONTENT_TYPE_JSON).await.unwrap();

    let sidecar = store.root().join("config").join(".props").join("active.json.json");
    std::fs::remove_file(&sidecar).unwrap();
    std::fs::create_dir(&sidecar).unwrap();
    std::fs::write(sidecar.join("occupied"), b"x").unwrap();

    let result = store.upload("config", "active.json", b"second", CONTENT_TYPE_JSON).await;
    assert!(result.is_err(), "sidecar cannot be replaced");

    assert_eq!(store.download("config", "active.json").await.unwrap(), b"first");
    assert_eq!(temp_files_in(&store.root().join("config")), 0);
    assert_eq!(temp_files_in(&store.root().join("config").join(".props")), 0);
}
