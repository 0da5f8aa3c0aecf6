//! Client for a remote PDF split/merge service.
//!
//! The crate holds the parts of the client that do not depend on how they
//! are rendered:
//! - [`page_range`] parses page range expressions like `"1-3, 5, 7-10"`
//! - [`selection`] tracks the files picked for a workflow
//! - [`workflow`] drives a submission from validation to a saved download
//! - [`service`] talks to the document service over HTTP
//!
//! The `pdftoolkit` binary is a thin CLI on top of these.

pub mod config;
pub mod download;
pub mod error;
pub mod page_range;
pub mod selection;
pub mod service;
pub mod workflow;

pub use config::Config;
pub use download::{DirectoryDownloader, Downloader};
pub use error::{ConfigError, DownloadError, RangeError, RequestError, SelectionError};
pub use page_range::{PageRange, PageRangeSpec};
pub use selection::{FileHandle, Selection};
pub use service::{HttpService, PdfService, ServiceRequest};
pub use workflow::{MergeWorkflow, RequestState, SplitWorkflow, WorkflowKind};
