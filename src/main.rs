mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Split { path, pages } => {
            commands::split::run(&cli.config()?, path, pages).await?;
        }
        Commands::Merge { inputs } => {
            commands::merge::run(&cli.config()?, inputs).await?;
        }
        Commands::Ranges { pages } => {
            commands::ranges::run(pages)?;
        }
        Commands::Health => {
            commands::health::run(&cli.config()?).await?;
        }
    }

    Ok(())
}

// Logs go to stderr so stdout only carries command output.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pdftoolkit=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
