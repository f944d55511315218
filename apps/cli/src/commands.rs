use crate::args::Command;
use anyhow::{Context, Result, bail};
use ragcfg::blob::BlobStore;
use ragcfg::store::{parse_config, to_document};
use ragcfg::{ConfigStore, default_config};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Executes `command` against `store`, writing any document to `out`.
///
/// # Errors
/// Fails when a save is rejected or the input file is unreadable or invalid.
pub async fn run<B: BlobStore>(store: &ConfigStore<B>, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show => {
            let config = store.load_active_or_default().await;
            print_document(out, &to_document(&config)?)?;
        },
        Command::Default => print_document(out, &to_document(&default_config())?)?,
        Command::Save { file, raw } => save(store, &file, raw).await?,
        Command::Reset => {
            store.save_as_active(&default_config()).await.context("Failed to reset configuration")?;
            info!("Active configuration reset to default");
        },
    }

    Ok(())
}

async fn save<B: BlobStore>(store: &ConfigStore<B>, file: &Path, raw: bool) -> Result<()> {
    let bytes = tokio::fs::read(file).await.with_context(|| format!("Failed to read {}", file.display()))?;

    if raw {
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).with_context(|| format!("{} is not JSON", file.display()))?;
        if !value.is_object() {
            bail!("{} must contain a JSON object", file.display());
        }
        store.save_raw_as_active(&value).await?;
    } else {
        let config = parse_config(&bytes).with_context(|| format!("{} is not a valid configuration", file.display()))?;
        store.save_as_active(&config).await?;
    }

    info!(file = %file.display(), raw, "Active configuration saved");
    Ok(())
}

fn print_document(out: &mut impl Write, document: &[u8]) -> Result<()> {
    out.write_all(document)?;
    writeln!(out)?;
    Ok(())
}
