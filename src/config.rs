use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the service base URL.
pub const API_URL_VAR: &str = "PDF_API_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Where the document service lives and where results are saved
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the document service
    pub api_url: Url,
    /// Directory that receives downloaded results
    pub download_dir: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            download_dir: PathBuf::from("."),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(API_URL_VAR).map_err(|_| ConfigError::Missing(API_URL_VAR))?;
        Self::new(&url)
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base}/{path}`, tolerating a trailing slash on the base
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.as_str().trim_end_matches('/'), path)
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}
