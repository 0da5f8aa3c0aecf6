use anyhow::{Context, Result};
use pdftoolkit::{Config, DirectoryDownloader, FileHandle, HttpService, SplitWorkflow};
use std::path::Path;

pub async fn run(config: &Config, input: &Path, pages: &str) -> Result<()> {
    let service = HttpService::new(config.clone()).context("Failed to build HTTP client")?;
    let downloader = DirectoryDownloader::new(&config.download_dir);
    let mut workflow = SplitWorkflow::new(service, downloader);

    let file = FileHandle::from_path(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    println!("Selected {} ({})", file.name(), file.display_size());

    workflow.add_files(vec![file])?;
    workflow.set_page_ranges(pages);

    let saved = workflow.submit().await?;

    println!("{}", workflow.success_message());
    println!("Saved to {}", saved.display());

    Ok(())
}
