use ragcfg::domain::{BlobCompression, BlobSettings};
use ragcfg::{default_config, open};
use tempfile::TempDir;

#[tokio::test]
async fn open_from_settings_round_trips() {
    let temp = TempDir::new().unwrap();
    let settings = BlobSettings {
        root: temp.path().join("blobs"),
        compression: BlobCompression::Lz4,
        create: true,
    };

    let store = open(&settings).await.unwrap();
    assert_eq!(store.load_active_or_default().await, default_config());

    let mut config = default_config();
    config.messages.post_answering_filter = "X".to_owned();
    store.save_as_active(&config).await.unwrap();

    let reopened = open(&settings).await.unwrap();
    assert_eq!(reopened.load_active_or_default().await, config);
}

#[tokio::test]
async fn open_without_create_needs_existing_root() {
    let temp = TempDir::new().unwrap();
    let settings = BlobSettings { root: temp.path().join("absent"), create: false, ..BlobSettings::default() };

    assert!(open(&settings).await.is_err());
}
