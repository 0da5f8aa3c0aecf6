use anyhow::{Context, Result};
use pdftoolkit::{Config, DirectoryDownloader, FileHandle, HttpService, MergeWorkflow};
use std::path::PathBuf;

pub async fn run(config: &Config, inputs: &[PathBuf]) -> Result<()> {
    let service = HttpService::new(config.clone()).context("Failed to build HTTP client")?;
    let downloader = DirectoryDownloader::new(&config.download_dir);
    let mut workflow = MergeWorkflow::new(service, downloader);

    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file = FileHandle::from_path(input)
            .await
            .with_context(|| format!("Failed to read {}", input.display()))?;
        files.push(file);
    }
    workflow.add_files(files)?;

    for (i, file) in workflow.files().iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, file.name(), file.display_size());
    }

    let saved = workflow.submit().await?;

    println!("{}", workflow.success_message());
    println!("Saved to {}", saved.display());

    Ok(())
}
