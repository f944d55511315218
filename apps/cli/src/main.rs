use anyhow::Context;
use clap::Parser;
use ragcfg::kernel::load_settings;
use ragcfg_cli::args::Cli;
use ragcfg_cli::{init_logger, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_deref()).context("Critical: Settings are malformed")?;
    let _log = init_logger(&settings.log, cli.verbose)?;

    let store = ragcfg::open(&settings.blob).await.context("Failed to open blob store")?;

    let mut stdout = std::io::stdout().lock();
    run(&store, cli.command, &mut stdout).await
}
