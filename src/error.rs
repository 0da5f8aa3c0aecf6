use std::path::PathBuf;
use thiserror::Error;

use crate::workflow::WorkflowKind;

/// Rejections raised while changing a file selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// One or more candidates are not declared as `application/pdf`.
    /// The whole batch was refused.
    #[error("{}", .0.not_pdf_message())]
    NotPdf(WorkflowKind),

    #[error("Selection cannot change while a request is in progress")]
    Locked,
}

/// Reasons a page range expression could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("No valid pages specified")]
    EmptyInput,

    #[error("Invalid page number: {0}")]
    NotANumber(String),

    #[error("Invalid range: {0}")]
    InvalidOrder(String),
}

/// Failures of a single submission attempt. All are terminal for that attempt.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Caught before any network call.
    #[error("{0}")]
    ValidationFailed(String),

    #[error(transparent)]
    InvalidRanges(#[from] RangeError),

    /// The service answered with a non-2xx status.
    #[error("{0}")]
    ServiceRejected(String),

    #[error("A request is already in progress")]
    Busy,

    #[error("Failed to save {}: {source}", .path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: DownloadError,
    },

    /// Network or decoding failure with no usable message.
    #[error("An error occurred")]
    Unknown(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RequestError {
    pub fn unknown(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RequestError::Unknown(Box::new(source))
    }
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid service URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("service URL must use http or https: {0}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            SelectionError::NotPdf(WorkflowKind::Merge).to_string(),
            "Only PDF files are allowed"
        );
        assert_eq!(
            SelectionError::NotPdf(WorkflowKind::Split).to_string(),
            "Please select a valid PDF file"
        );
        assert_eq!(
            RequestError::ServiceRejected("corrupt file".into()).to_string(),
            "corrupt file"
        );
        assert_eq!(
            RequestError::from(RangeError::InvalidOrder("5-2".into())).to_string(),
            "Invalid range: 5-2"
        );
    }

    #[test]
    fn test_unknown_hides_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = RequestError::unknown(io);
        assert_eq!(err.to_string(), "An error occurred");
        assert!(std::error::Error::source(&err).is_some());
    }
}
