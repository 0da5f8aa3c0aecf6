use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdftoolkit::Config;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pdftoolkit")]
#[command(about = "Split and merge PDF files through a PDF processing service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the service (defaults to $PDF_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for downloaded results
    #[arg(short, long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "120")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract page ranges from a PDF into split_<name>
    #[command(alias = "extract")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Page ranges (e.g., "1-3, 5, 7-10"); order and repeats are kept
        pages: String,
    },

    /// Combine PDFs into merged.pdf, in the order given
    Merge {
        /// PDF files to merge (at least two)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Check a page range expression without contacting the service
    Ranges {
        /// Page ranges (e.g., "1-3, 5, 7-10")
        pages: String,
    },

    /// Check that the service is up
    Health,
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        let config = match &self.api_url {
            Some(url) => Config::new(url)?,
            None => Config::from_env().context("No service URL (use --api-url)")?,
        };
        Ok(config
            .with_download_dir(&self.output_dir)
            .with_timeout(Duration::from_secs(self.timeout)))
    }
}
