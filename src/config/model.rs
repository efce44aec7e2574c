// src/config/model.rs

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Renderer used when the config does not name one.
pub const DEFAULT_RENDERER: &str = "/app/bin/wkhtmltopdf";

/// How long to wait for the renderer to exit after its stdout closed.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [server]
/// bind = "0.0.0.0:8080"
///
/// [renderer]
/// executable = "/app/bin/wkhtmltopdf"
/// wait_timeout_ms = 5000
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: RawServerSection,

    #[serde(default)]
    pub renderer: RawRendererSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawServerSection {
    /// Socket address the HTTP server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for RawServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// `[renderer]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRendererSection {
    /// Path of the HTML-to-PDF executable.
    #[serde(default = "default_renderer")]
    pub executable: String,

    /// Upper bound for the post-stream wait on the renderer, in milliseconds.
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
}

fn default_renderer() -> String {
    DEFAULT_RENDERER.to_string()
}

fn default_wait_timeout_ms() -> u64 {
    DEFAULT_WAIT_TIMEOUT_MS
}

impl Default for RawRendererSection {
    fn default() -> Self {
        Self {
            executable: default_renderer(),
            wait_timeout_ms: default_wait_timeout_ms(),
        }
    }
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSection {
    pub bind: SocketAddr,
}

/// Everything `PdfCreator` needs to know about the external renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    pub executable: PathBuf,
    pub wait_timeout: Duration,
}

impl RendererConfig {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            wait_timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
        }
    }

    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RENDERER)
    }
}

impl ConfigFile {
    pub(crate) fn new_unchecked(server: ServerSection, renderer: RendererConfig) -> Self {
        Self { server, renderer }
    }
}
