// src/export/mod.rs

//! Document export layer.
//!
//! This module runs the external HTML-to-PDF renderer with
//! `tokio::process::Command` and relays its stdout into a response sink.
//!
//! - [`request`] holds the export request and its inbound JSON form.
//! - [`sink`] defines the `ResponseSink` trait and the buffered HTTP sink.
//! - [`command`] builds the fixed renderer argument list.
//! - [`process`] owns a running renderer: bounded wait, exit status, stderr
//!   capture and guaranteed release.
//! - [`creator`] ties these together in `PdfCreator::create`.

pub mod command;
pub mod creator;
pub mod process;
pub mod request;
pub mod sink;

pub use command::RenderCommand;
pub use creator::{PDF_CONTENT_TYPE, PdfCreator, content_disposition};
pub use process::{RendererProcess, WaitOutcome};
pub use request::{ExportRequest, PdfFileRequest};
pub use sink::{BufferedResponse, ResponseSink};
