use anyhow::{Context, Result};
use pdftoolkit::{Config, HttpService};

pub async fn run(config: &Config) -> Result<()> {
    let service = HttpService::new(config.clone()).context("Failed to build HTTP client")?;
    let status = service.health().await?;

    println!("{}: {}", config.api_url, status);

    Ok(())
}
