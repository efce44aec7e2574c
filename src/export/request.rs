// src/export/request.rs

use std::fmt;

use serde::Deserialize;
use url::Url;

use crate::errors::RequestError;

/// A validated request to render `source_url` into a download named `file_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub source_url: String,
    /// Used verbatim in `Content-Disposition`; no escaping is applied.
    pub file_name: String,
}

impl ExportRequest {
    pub fn new(source_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source url: {} file name: {}",
            self.source_url, self.file_name
        )
    }
}

/// JSON body accepted by `POST /pdf`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfFileRequest {
    #[serde(alias = "sourceUrl")]
    pub source_html_url: String,
    pub file_name: String,
}

impl PdfFileRequest {
    /// Check field presence and URL shape, then hand over to the export layer.
    pub fn into_export_request(self) -> Result<ExportRequest, RequestError> {
        let source_url = self.source_html_url.trim();
        if source_url.is_empty() {
            return Err(RequestError::EmptySourceUrl);
        }
        Url::parse(source_url).map_err(|e| RequestError::InvalidSourceUrl(e.to_string()))?;

        if self.file_name.is_empty() {
            return Err(RequestError::EmptyFileName);
        }

        Ok(ExportRequest::new(source_url, self.file_name))
    }
}
