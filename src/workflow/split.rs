use std::path::PathBuf;
use tracing::{debug, info};

use super::{add_to_selection, remove_from_selection, send_and_save, RequestState, WorkflowKind};
use crate::download::Downloader;
use crate::error::{RangeError, RequestError, SelectionError};
use crate::page_range::PageRangeSpec;
use crate::selection::{FileHandle, Selection};
use crate::service::{PdfService, ServiceRequest};

/// Extract pages of one PDF through the service.
#[derive(Debug)]
pub struct SplitWorkflow<S, D> {
    service: S,
    downloader: D,
    selection: Selection,
    page_ranges: String,
    state: RequestState,
}

impl<S: PdfService, D: Downloader> SplitWorkflow<S, D> {
    pub fn new(service: S, downloader: D) -> Self {
        SplitWorkflow {
            service,
            downloader,
            selection: Selection::new(WorkflowKind::Split),
            page_ranges: String::new(),
            state: RequestState::default(),
        }
    }

    /// Choose the file to split. Only the first candidate is kept.
    pub fn add_files(&mut self, candidates: Vec<FileHandle>) -> Result<(), SelectionError> {
        add_to_selection(&mut self.state, &mut self.selection, candidates)
    }

    pub fn remove_file(&mut self) -> Option<FileHandle> {
        remove_from_selection(&mut self.state, &mut self.selection, 0)
    }

    pub fn file(&self) -> Option<&FileHandle> {
        self.selection.first()
    }

    /// Replace the range text. Ignored while a request is in flight.
    pub fn set_page_ranges(&mut self, text: impl Into<String>) -> bool {
        if !self.state.accepts_input() {
            return false;
        }
        self.page_ranges = text.into();
        true
    }

    pub fn page_ranges(&self) -> &str {
        &self.page_ranges
    }

    /// Parse the current range text without submitting
    pub fn preview(&self) -> Result<PageRangeSpec, RangeError> {
        PageRangeSpec::parse(&self.page_ranges)
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state.accepts_input() && self.file().is_some()
    }

    pub fn success_message(&self) -> &'static str {
        WorkflowKind::Split.success_message()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Validate, send the file with the raw range text, and save
    /// `split_<name>` on success. The range text is cleared afterwards; the
    /// selected file stays so it can be split again.
    pub async fn submit(&mut self) -> Result<PathBuf, RequestError> {
        let submission = self.state.begin_submit()?;

        let (file, spec) = match validate(&self.selection, &self.page_ranges) {
            Ok(valid) => valid,
            Err(err) => return Err(submission.fail(err)),
        };

        info!(
            file = file.name(),
            ranges = %spec,
            pages = spec.page_count(),
            "submitting split"
        );
        let filename = format!("split_{}", file.name());
        let request = ServiceRequest::split(file, self.page_ranges.clone());

        let path = send_and_save(
            submission,
            &self.service,
            &self.downloader,
            request,
            &filename,
        )
        .await?;

        debug!("clearing page ranges");
        self.page_ranges.clear();
        Ok(path)
    }
}

fn validate(
    selection: &Selection,
    page_ranges: &str,
) -> Result<(FileHandle, PageRangeSpec), RequestError> {
    let file = selection
        .first()
        .cloned()
        .ok_or_else(|| RequestError::ValidationFailed("Please select a PDF file".into()))?;

    if page_ranges.trim().is_empty() {
        return Err(RequestError::ValidationFailed(
            "Please enter page ranges".into(),
        ));
    }

    let spec = PageRangeSpec::parse(page_ranges)?;
    Ok((file, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::pdf;
    use crate::workflow::testing::{FakeService, MemoryDownloader, Reply, PDF_BYTES};
    use std::time::Duration;

    fn workflow(reply: Reply) -> SplitWorkflow<FakeService, MemoryDownloader> {
        SplitWorkflow::new(FakeService::new(reply), MemoryDownloader::default())
    }

    #[tokio::test]
    async fn test_success_clears_only_ranges() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("report.pdf")]).unwrap();
        split.set_page_ranges("1-3, 5");

        let path = split.submit().await.unwrap();

        assert_eq!(path, PathBuf::from("split_report.pdf"));
        assert!(split.state().is_succeeded());
        assert_eq!(split.page_ranges(), "");
        assert_eq!(split.file().map(FileHandle::name), Some("report.pdf"));

        let saved = split.downloader().saved.lock().unwrap().clone();
        assert_eq!(saved, vec![("split_report.pdf".to_string(), PDF_BYTES.to_vec())]);
    }

    #[tokio::test]
    async fn test_sends_raw_text() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges(" 3,3, 1-2 ");
        split.submit().await.unwrap();

        assert_eq!(
            split.service().last_fields(),
            vec![
                ("file", "a.pdf".to_string()),
                ("page_ranges", " 3,3, 1-2 ".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_requires_file() {
        let mut split = workflow(Reply::Pdf);
        split.set_page_ranges("1");

        let err = split.submit().await.unwrap_err();
        assert!(matches!(err, RequestError::ValidationFailed(_)));
        assert_eq!(split.state().failure(), Some("Please select a PDF file"));
        assert_eq!(split.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_requires_range_text() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("   ");

        let err = split.submit().await.unwrap_err();
        assert!(matches!(err, RequestError::ValidationFailed(_)));
        assert_eq!(split.state().failure(), Some("Please enter page ranges"));
        assert_eq!(split.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_error_fails_before_network() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("5-2");

        let err = split.submit().await.unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidRanges(RangeError::InvalidOrder(ref t)) if t == "5-2"
        ));
        assert_eq!(split.state().failure(), Some("Invalid range: 5-2"));
        assert_eq!(split.service().calls(), 0);
        assert_eq!(split.page_ranges(), "5-2");
    }

    #[tokio::test]
    async fn test_service_rejection() {
        let mut split = workflow(Reply::Reject("Invalid page number: 40"));
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("40");

        split.submit().await.unwrap_err();
        assert_eq!(split.state().failure(), Some("Invalid page number: 40"));
        assert_eq!(split.page_ranges(), "40");
        assert!(split.downloader().saved_names().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_is_generic() {
        let mut split = workflow(Reply::Unreachable);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("1");

        split.submit().await.unwrap_err();
        assert_eq!(split.state().failure(), Some("An error occurred"));
    }

    #[tokio::test]
    async fn test_save_failure_reports_failed() {
        let service = FakeService::new(Reply::Pdf);
        let downloader = MemoryDownloader {
            fail: true,
            ..Default::default()
        };
        let mut split = SplitWorkflow::new(service, downloader);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("1");

        let err = split.submit().await.unwrap_err();
        assert!(matches!(err, RequestError::SaveFailed { .. }));
        assert!(split.state().failure().is_some());
        assert_eq!(split.page_ranges(), "1");
    }

    #[tokio::test]
    async fn test_new_file_clears_previous_outcome() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("1");
        split.submit().await.unwrap();
        assert!(split.state().is_succeeded());

        split.add_files(vec![pdf("b.pdf")]).unwrap();
        assert_eq!(*split.state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_rejected_pick_keeps_file() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();

        let err = split
            .add_files(vec![FileHandle::new("pic.png", vec![1, 2], "image/png")])
            .unwrap_err();
        assert_eq!(err, SelectionError::NotPdf(WorkflowKind::Split));
        assert_eq!(split.file().map(FileHandle::name), Some("a.pdf"));
        assert_eq!(split.state().failure(), Some("Please select a valid PDF file"));
    }

    #[tokio::test]
    async fn test_inputs_locked_while_submitting() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.state = RequestState::Submitting;

        assert!(!split.set_page_ranges("1"));
        assert_eq!(
            split.add_files(vec![pdf("b.pdf")]),
            Err(SelectionError::Locked)
        );
        assert!(split.remove_file().is_none());
        assert!(!split.can_submit());
        assert!(matches!(split.submit().await, Err(RequestError::Busy)));
        assert_eq!(*split.state(), RequestState::Submitting);
        assert_eq!(split.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let mut split = workflow(Reply::Pdf);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("abc");
        split.submit().await.unwrap_err();
        assert_eq!(split.state().failure(), Some("Invalid page number: abc"));

        split.set_page_ranges("2");
        split.submit().await.unwrap();
        assert!(split.state().is_succeeded());
        assert_eq!(split.service().calls(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_submit_reopens_inputs() {
        let mut split = workflow(Reply::Hang);
        split.add_files(vec![pdf("a.pdf")]).unwrap();
        split.set_page_ranges("1-2");

        let outcome = tokio::time::timeout(Duration::from_millis(50), split.submit()).await;
        assert!(outcome.is_err());

        assert!(split.state().accepts_input());
        assert_eq!(split.state().failure(), Some("An error occurred"));
        assert!(split.set_page_ranges("3"));
        split.add_files(vec![pdf("b.pdf")]).unwrap();
        assert_eq!(*split.state(), RequestState::Idle);
        assert!(split.can_submit());
        assert_eq!(split.service().calls(), 1);
    }

    #[test]
    fn test_preview() {
        let mut split = workflow(Reply::Pdf);
        split.set_page_ranges("7-10,1");
        assert_eq!(split.preview().unwrap().to_string(), "7-10, 1");
    }
}
