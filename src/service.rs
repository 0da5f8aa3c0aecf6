use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::future::Future;
use tracing::debug;

use crate::config::Config;
use crate::error::RequestError;
use crate::selection::{FileHandle, PDF_MEDIA_TYPE};
use crate::workflow::WorkflowKind;

/// One multipart field, in the order it is sent.
#[derive(Debug, Clone)]
pub enum FormField {
    File { name: &'static str, file: FileHandle },
    Text { name: &'static str, value: String },
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::File { name, .. } | FormField::Text { name, .. } => name,
        }
    }
}

/// A request to the document service: which operation, and its form body.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub kind: WorkflowKind,
    pub fields: Vec<FormField>,
}

impl ServiceRequest {
    /// `file` + raw `page_ranges`, text sent exactly as typed
    pub fn split(file: FileHandle, page_ranges: impl Into<String>) -> Self {
        ServiceRequest {
            kind: WorkflowKind::Split,
            fields: vec![
                FormField::File { name: "file", file },
                FormField::Text {
                    name: "page_ranges",
                    value: page_ranges.into(),
                },
            ],
        }
    }

    /// One `files` field per input, in selection order
    pub fn merge(files: &[FileHandle]) -> Self {
        ServiceRequest {
            kind: WorkflowKind::Merge,
            fields: files
                .iter()
                .map(|file| FormField::File {
                    name: "files",
                    file: file.clone(),
                })
                .collect(),
        }
    }

    fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for field in self.fields {
            form = match field {
                FormField::File { name, file } => {
                    let part = Part::bytes(file.bytes().to_vec())
                        .file_name(file.name().to_string())
                        .mime_str(PDF_MEDIA_TYPE)?;
                    form.part(name, part)
                }
                FormField::Text { name, value } => form.text(name, value),
            };
        }
        Ok(form)
    }
}

/// The external document-processing service.
///
/// On success the response body is the resulting PDF.
pub trait PdfService {
    fn submit(
        &self,
        request: ServiceRequest,
    ) -> impl Future<Output = Result<Vec<u8>, RequestError>> + Send;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// `PdfService` over HTTP multipart POSTs.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: reqwest::Client,
    config: Config,
}

impl HttpService {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(HttpService { client, config })
    }

    /// `GET {base}/health`, returning the reported status
    pub async fn health(&self) -> Result<String, RequestError> {
        let url = self.config.endpoint("health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(RequestError::unknown)?;

        if !response.status().is_success() {
            return Err(RequestError::ServiceRejected(format!(
                "Service unavailable ({})",
                response.status()
            )));
        }

        let body: HealthBody = response.json().await.map_err(RequestError::unknown)?;
        Ok(body.status)
    }
}

impl PdfService for HttpService {
    async fn submit(&self, request: ServiceRequest) -> Result<Vec<u8>, RequestError> {
        let kind = request.kind;
        let url = self.config.endpoint(kind.endpoint());
        let form = request.into_form().map_err(RequestError::unknown)?;

        debug!(%url, "posting multipart request");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(RequestError::unknown)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "service rejected request");
            let detail = match response.json::<ErrorBody>().await {
                Ok(ErrorBody {
                    detail: Some(serde_json::Value::String(detail)),
                }) if !detail.is_empty() => detail,
                _ => kind.failure_message().to_string(),
            };
            return Err(RequestError::ServiceRejected(detail));
        }

        let body = response.bytes().await.map_err(RequestError::unknown)?;
        Ok(body.to_vec())
    }
}
