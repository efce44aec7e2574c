// src/export/command.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

/// Margin flags passed to the renderer, each set to `0mm`.
const ZERO_MARGIN_FLAGS: [&str; 4] = [
    "--margin-left",
    "--margin-right",
    "--margin-bottom",
    "--margin-top",
];

/// Final argument telling the renderer to write to stdout instead of a file.
pub const STDOUT_MARKER: &str = "-";

/// A fully-resolved renderer invocation.
///
/// ```text
/// <renderer> --margin-left 0mm --margin-right 0mm --margin-bottom 0mm --margin-top 0mm <url> -
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommand {
    executable: PathBuf,
    args: Vec<String>,
}

impl RenderCommand {
    pub fn new(executable: impl Into<PathBuf>, source_url: &str) -> Self {
        let mut args = Vec::with_capacity(ZERO_MARGIN_FLAGS.len() * 2 + 2);
        for flag in ZERO_MARGIN_FLAGS {
            args.push(flag.to_string());
            args.push("0mm".to_string());
        }
        args.push(source_url.to_string());
        args.push(STDOUT_MARKER.to_string());

        Self {
            executable: executable.into(),
            args,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Executable followed by all arguments.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.executable.clone().into_os_string())
            .chain(self.args.iter().map(OsString::from))
            .collect()
    }

    /// Build the process with stdout/stderr piped and stdin closed.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}
