//! Request orchestration for the split and merge workflows.
//!
//! Each workflow owns its own selection, its own [`RequestState`], and
//! drives one submission at a time:
//! 1. `Idle`/`Succeeded`/`Failed` -> `Validating` on submit
//! 2. local checks (file count, range text) -> `Submitting`
//! 3. one multipart POST to the service
//! 4. `Succeeded` plus a saved download, or `Failed(reason)`

mod merge;
mod split;
mod state;

pub use merge::MergeWorkflow;
pub use split::SplitWorkflow;
pub use state::{RequestState, Submission};

use std::path::PathBuf;
use tracing::info;

use crate::download::Downloader;
use crate::error::{RequestError, SelectionError};
use crate::selection::{FileHandle, Selection};
use crate::service::{PdfService, ServiceRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    Split,
    Merge,
}

impl WorkflowKind {
    /// Path of the service endpoint, relative to the base URL
    pub fn endpoint(self) -> &'static str {
        match self {
            WorkflowKind::Split => "split",
            WorkflowKind::Merge => "merge",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            WorkflowKind::Split => "Failed to split PDF",
            WorkflowKind::Merge => "Failed to merge PDFs",
        }
    }

    pub fn not_pdf_message(self) -> &'static str {
        match self {
            WorkflowKind::Split => "Please select a valid PDF file",
            WorkflowKind::Merge => "Only PDF files are allowed",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            WorkflowKind::Split => "PDF split successfully! Download started.",
            WorkflowKind::Merge => "PDFs merged successfully! Download started.",
        }
    }
}

/// Apply a user pick to `selection`. A change clears the previous outcome;
/// a refused batch leaves the selection alone and reports why.
fn add_to_selection(
    state: &mut RequestState,
    selection: &mut Selection,
    candidates: Vec<FileHandle>,
) -> Result<(), SelectionError> {
    if !state.accepts_input() {
        return Err(SelectionError::Locked);
    }

    match selection.add_files(candidates) {
        Ok(()) => {
            state.reset();
            Ok(())
        }
        Err(err) => {
            state.reject_input(err.to_string());
            Err(err)
        }
    }
}

fn remove_from_selection(
    state: &mut RequestState,
    selection: &mut Selection,
    index: usize,
) -> Option<FileHandle> {
    if !state.accepts_input() {
        return None;
    }

    let removed = selection.remove_file(index);
    if removed.is_some() {
        state.reset();
    }
    removed
}

/// `Submitting` through to the final outcome: send, then save the payload.
async fn send_and_save<S, D>(
    mut submission: Submission<'_>,
    service: &S,
    downloader: &D,
    request: ServiceRequest,
    filename: &str,
) -> Result<PathBuf, RequestError>
where
    S: PdfService,
    D: Downloader,
{
    submission.start_request();
    let kind = request.kind;

    let bytes = match service.submit(request).await {
        Ok(bytes) => bytes,
        Err(err) => return Err(submission.fail(err)),
    };

    let path = match downloader.save(filename, bytes).await {
        Ok(path) => path,
        Err(source) => {
            return Err(submission.fail(RequestError::SaveFailed {
                path: PathBuf::from(filename),
                source,
            }))
        }
    };

    info!(operation = kind.endpoint(), path = %path.display(), "request succeeded");
    submission.succeed();
    Ok(path)
}
