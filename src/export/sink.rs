// src/export/sink.rs

//! Response sink abstraction.
//!
//! `PdfCreator` only ever writes to a sink: body bytes first, then (on
//! success) the two download headers. It never closes or replaces it.

use tokio::io::AsyncWrite;

/// Destination of a rendered document, typically an HTTP response.
pub trait ResponseSink: Send {
    /// Writable body stream.
    fn body(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send);

    fn set_content_type(&mut self, value: &str);

    fn set_content_disposition(&mut self, value: &str);
}

/// In-memory sink used by the HTTP adapter.
///
/// The body is held until `create` returns; the adapter chooses the status
/// code only after the renderer's exit status is known.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    body: Vec<u8>,
    content_type: Option<String>,
    content_disposition: Option<String>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    /// Split into `(body, content_type, content_disposition)`.
    pub fn into_parts(self) -> (Vec<u8>, Option<String>, Option<String>) {
        (self.body, self.content_type, self.content_disposition)
    }
}

impl ResponseSink for BufferedResponse {
    fn body(&mut self) -> &mut (dyn AsyncWrite + Unpin + Send) {
        &mut self.body
    }

    fn set_content_type(&mut self, value: &str) {
        self.content_type = Some(value.to_string());
    }

    fn set_content_disposition(&mut self, value: &str) {
        self.content_disposition = Some(value.to_string());
    }
}
