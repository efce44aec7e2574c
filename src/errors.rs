// src/errors.rs

//! Crate-wide error types.
//!
//! - [`GatewayError`] covers the service shell (config, IO, TOML).
//! - [`RenderError`] is the internal taxonomy of renderer failures. It never
//!   leaves [`crate::export::PdfCreator`]; it is logged and then collapsed
//!   into [`PdfGenerationFailed`].
//! - [`RequestError`] rejects malformed inbound export requests.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Internal failure kinds of a single render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer executable could not be started.
    #[error("could not launch renderer '{executable}': {source}")]
    ProcessLaunch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer exited non-zero, or its exit status is not available.
    #[error("renderer failed ({reason}), exit code: {exit_code:?}")]
    ProcessExecution {
        exit_code: Option<i32>,
        reason: String,
    },

    /// Relaying renderer stdout into the response sink failed mid-stream.
    #[error("copying renderer output to the response failed: {0}")]
    StreamCopy(#[source] std::io::Error),
}

/// The only export failure visible to callers of `PdfCreator`.
///
/// The underlying `RenderError` is logged, never attached.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("PDF generation failed")]
pub struct PdfGenerationFailed;

impl From<RenderError> for PdfGenerationFailed {
    fn from(_: RenderError) -> Self {
        PdfGenerationFailed
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("sourceHtmlUrl must not be empty")]
    EmptySourceUrl,

    #[error("sourceHtmlUrl is not a valid URL: {0}")]
    InvalidSourceUrl(String),

    #[error("fileName must not be empty")]
    EmptyFileName,
}
