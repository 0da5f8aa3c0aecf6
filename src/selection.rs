use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::SelectionError;
use crate::workflow::WorkflowKind;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const OCTET_STREAM: &str = "application/octet-stream";

/// A file chosen by the user: payload, name and declared media type.
///
/// The payload is shared, so cloning a handle is cheap.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    media_type: String,
    bytes: Arc<[u8]>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        FileHandle {
            name: name.into(),
            media_type: media_type.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    /// Read a file from disk. The declared type comes from the extension,
    /// the same way a browser file picker assigns it.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let media_type = if is_pdf { PDF_MEDIA_TYPE } else { OCTET_STREAM };

        Ok(FileHandle::new(name, bytes, media_type))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size for display, e.g. "12.3 KB"
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.size() as f64 / 1024.0)
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size())
            .finish()
    }
}

/// The ordered set of files picked for one workflow.
///
/// Split keeps at most one file (a new pick replaces it); merge appends.
#[derive(Debug, Clone)]
pub struct Selection {
    kind: WorkflowKind,
    files: Vec<FileHandle>,
}

impl Selection {
    pub fn new(kind: WorkflowKind) -> Self {
        Selection {
            kind,
            files: Vec::new(),
        }
    }

    /// Admit a batch of candidates, all or nothing.
    pub fn add_files(&mut self, candidates: Vec<FileHandle>) -> Result<(), SelectionError> {
        if candidates.iter().any(|file| !file.is_pdf()) {
            return Err(SelectionError::NotPdf(self.kind));
        }

        match self.kind {
            WorkflowKind::Split => {
                // Only the first pick counts, like a single-file input.
                if let Some(file) = candidates.into_iter().next() {
                    self.files = vec![file];
                }
            }
            WorkflowKind::Merge => self.files.extend(candidates),
        }
        Ok(())
    }

    /// Remove the file at `index`. Out of range is ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<FileHandle> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn first(&self) -> Option<&FileHandle> {
        self.files.first()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn pdf(name: &str) -> FileHandle {
    FileHandle::new(name, format!("%PDF-1.7 {}", name).into_bytes(), PDF_MEDIA_TYPE)
}
