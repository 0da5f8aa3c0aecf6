use std::path::PathBuf;
use tracing::info;

use super::{add_to_selection, remove_from_selection, send_and_save, RequestState, WorkflowKind};
use crate::download::Downloader;
use crate::error::{RequestError, SelectionError};
use crate::selection::{FileHandle, Selection};
use crate::service::{PdfService, ServiceRequest};

const MERGED_FILENAME: &str = "merged.pdf";

/// Concatenate several PDFs through the service, in selection order.
#[derive(Debug)]
pub struct MergeWorkflow<S, D> {
    service: S,
    downloader: D,
    selection: Selection,
    state: RequestState,
}

impl<S: PdfService, D: Downloader> MergeWorkflow<S, D> {
    pub fn new(service: S, downloader: D) -> Self {
        MergeWorkflow {
            service,
            downloader,
            selection: Selection::new(WorkflowKind::Merge),
            state: RequestState::default(),
        }
    }

    /// Append files to the end of the selection
    pub fn add_files(&mut self, candidates: Vec<FileHandle>) -> Result<(), SelectionError> {
        add_to_selection(&mut self.state, &mut self.selection, candidates)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<FileHandle> {
        remove_from_selection(&mut self.state, &mut self.selection, index)
    }

    pub fn files(&self) -> &[FileHandle] {
        self.selection.files()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state.accepts_input() && self.selection.len() >= 2
    }

    pub fn success_message(&self) -> &'static str {
        WorkflowKind::Merge.success_message()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Send every selected file and save `merged.pdf`. The selection is
    /// emptied after a successful merge.
    pub async fn submit(&mut self) -> Result<PathBuf, RequestError> {
        let submission = self.state.begin_submit()?;

        if self.selection.len() < 2 {
            let err = RequestError::ValidationFailed(
                "Please select at least 2 PDF files to merge".into(),
            );
            return Err(submission.fail(err));
        }

        info!(files = self.selection.len(), "submitting merge");
        let request = ServiceRequest::merge(self.selection.files());

        let path = send_and_save(
            submission,
            &self.service,
            &self.downloader,
            request,
            MERGED_FILENAME,
        )
        .await?;

        self.selection.clear();
        Ok(path)
    }
}
