use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::DownloadError;

/// Destination for a finished document ("save as" download).
pub trait Downloader {
    fn save(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<PathBuf, DownloadError>> + Send;
}

/// Saves downloads into a directory.
///
/// Each file is written to a temporary file next to the target and renamed
/// into place, so a failed save never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DirectoryDownloader { dir: dir.into() }
    }
}

impl Downloader for DirectoryDownloader {
    async fn save(&self, filename: &str, bytes: Vec<u8>) -> Result<PathBuf, DownloadError> {
        // Names come from user files; keep only the last path component.
        let name = Path::new(filename)
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DownloadError::InvalidName(filename.to_string()))?
            .to_owned();

        let dir = self.dir.clone();
        let size = bytes.len();
        let target = tokio::task::spawn_blocking(move || write_atomic(&dir, &name, &bytes))
            .await
            .map_err(|e| DownloadError::Io(std::io::Error::other(e)))??;

        info!(path = %target.display(), size, "saved download");
        Ok(target)
    }
}

fn write_atomic(
    dir: &Path,
    name: &std::ffi::OsStr,
    bytes: &[u8],
) -> Result<PathBuf, DownloadError> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(name);

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| DownloadError::Io(e.error))?;
    Ok(target)
}
