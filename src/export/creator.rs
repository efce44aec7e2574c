// src/export/creator.rs

use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::RendererConfig;
use crate::errors::{PdfGenerationFailed, RenderError};
use crate::export::command::RenderCommand;
use crate::export::process::{RendererProcess, WaitOutcome};
use crate::export::request::ExportRequest;
use crate::export::sink::ResponseSink;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// `Content-Disposition` value for a download named `file_name`, unescaped.
pub fn content_disposition(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}

/// Renders a URL to PDF with the external renderer and streams the result
/// into a [`ResponseSink`].
#[derive(Debug, Clone)]
pub struct PdfCreator {
    renderer: RendererConfig,
}

impl PdfCreator {
    pub fn new(renderer: RendererConfig) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Same as [`create_with_cancel`](Self::create_with_cancel) with a token
    /// that never fires.
    pub async fn create<S>(
        &self,
        request: &ExportRequest,
        sink: &mut S,
    ) -> Result<(), PdfGenerationFailed>
    where
        S: ResponseSink + ?Sized,
    {
        self.create_with_cancel(request, sink, &CancellationToken::new())
            .await
    }

    /// Render `request.source_url` into `sink`.
    ///
    /// Body bytes are written as the renderer produces them. Headers are set
    /// only once the whole body is copied and the renderer exited with 0.
    /// Any failure is logged together with the renderer's exit code and
    /// stderr, then reported as the opaque [`PdfGenerationFailed`].
    ///
    /// `cancel` only shortens the post-stream wait; it does not interrupt
    /// the copy.
    pub async fn create_with_cancel<S>(
        &self,
        request: &ExportRequest,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> Result<(), PdfGenerationFailed>
    where
        S: ResponseSink + ?Sized,
    {
        let command = RenderCommand::new(&self.renderer.executable, &request.source_url);

        let mut process = match RendererProcess::spawn(&command) {
            Ok(process) => process,
            Err(err) => {
                error!(
                    request = %request,
                    error = %err,
                    "Could not create a PDF file because the renderer did not start"
                );
                return Err(err.into());
            }
        };

        match self.render(&mut process, request, sink, cancel).await {
            Ok(bytes) => {
                info!(request = %request, bytes, "Wrote PDF file to the response");
                Ok(())
            }
            Err(err) => {
                let exit_code = process.exit_code();
                let stderr = process.diagnostics().await;
                error!(
                    request = %request,
                    error = %err,
                    exit_code = ?exit_code,
                    stderr = %stderr,
                    "Could not create PDF because the renderer failed"
                );
                Err(err.into())
            }
        }
    }

    async fn render<S>(
        &self,
        process: &mut RendererProcess,
        request: &ExportRequest,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> Result<u64, RenderError>
    where
        S: ResponseSink + ?Sized,
    {
        let mut stdout = process.take_stdout()?;

        debug!(pid = process.pid(), "Writing created PDF file to response");
        let body = sink.body();
        let bytes = tokio::io::copy(&mut stdout, &mut *body)
            .await
            .map_err(RenderError::StreamCopy)?;
        body.flush().await.map_err(RenderError::StreamCopy)?;
        drop(stdout);

        // An abandoned wait still falls through to the exit status check.
        let status = match process.wait_bounded(self.renderer.wait_timeout, cancel).await {
            WaitOutcome::Exited(status) => status,
            WaitOutcome::TimedOut | WaitOutcome::Cancelled | WaitOutcome::Failed(_) => {
                process.exit_status()?
            }
        };
        if !status.success() {
            return Err(RenderError::ProcessExecution {
                exit_code: status.code(),
                reason: "renderer exited unsuccessfully".to_string(),
            });
        }

        sink.set_content_type(PDF_CONTENT_TYPE);
        sink.set_content_disposition(&content_disposition(&request.file_name));

        Ok(bytes)
    }
}
