// StockVision - stock image SEO research from the command line
// Entry point and application setup

use anyhow::Context;
use clap::Parser;
use stockvision::app::{self, App};
use stockvision::cli::Cli;
use stockvision::commands;
use stockvision::services::GeminiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    tracing::info!("Starting StockVision {}", env!("CARGO_PKG_VERSION"));

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => app::default_data_dir()?,
    };

    let storage = app::open_storage(&data_dir, cli.storage)
        .await
        .context("failed to open storage")?;
    let transport = GeminiClient::new(cli.api_base.clone(), cli.model.clone());

    let mut app = App::load(storage, transport)
        .await
        .context("failed to load saved data")?;

    let output = commands::dispatch(cli.command, &mut app, cli.format).await?;
    println!("{output}");
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) {
    let default_filter = if quiet {
        "error"
    } else if verbose {
        "stockvision=debug,info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
