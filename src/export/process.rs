// src/export/process.rs

//! Owned handle on one renderer process.
//!
//! The handle is created by [`RendererProcess::spawn`] and released by its
//! `Drop` impl, so every exit path of a render (success, error, timeout or a
//! dropped future) ends with the child killed if it is still alive.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::errors::RenderError;
use crate::export::command::RenderCommand;

/// Upper bound on reading stderr once a render has failed.
pub const STDERR_DRAIN_BUDGET: Duration = Duration::from_secs(1);

/// How a bounded wait ended.
#[derive(Debug)]
#[must_use]
pub enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
    Cancelled,
    Failed(std::io::Error),
}

pub struct RendererProcess {
    child: Child,
    pid: Option<u32>,
    stdout: Option<ChildStdout>,
    stderr_task: Option<JoinHandle<String>>,
}

impl RendererProcess {
    /// Start the renderer and begin draining its stderr in the background.
    pub fn spawn(command: &RenderCommand) -> Result<Self, RenderError> {
        let mut child = command
            .to_command()
            .spawn()
            .map_err(|source| RenderError::ProcessLaunch {
                executable: command.executable().display().to_string(),
                source,
            })?;

        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(read_stderr(stderr, pid)));

        debug!(pid, executable = %command.executable().display(), "renderer process started");

        Ok(Self {
            child,
            pid,
            stdout,
            stderr_task,
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Take the renderer's stdout. Only available once.
    pub fn take_stdout(&mut self) -> Result<ChildStdout, RenderError> {
        self.stdout.take().ok_or_else(|| {
            RenderError::StreamCopy(std::io::Error::other("renderer stdout was not captured"))
        })
    }

    /// Wait for the renderer to exit, giving up after `timeout` or as soon as
    /// `cancel` fires. The process is never killed here.
    pub async fn wait_bounded(
        &mut self,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> WaitOutcome {
        let outcome = tokio::select! {
            biased;

            _ = cancel.cancelled() => WaitOutcome::Cancelled,

            res = tokio::time::timeout(timeout, self.child.wait()) => match res {
                Ok(Ok(status)) => WaitOutcome::Exited(status),
                Ok(Err(e)) => WaitOutcome::Failed(e),
                Err(_) => WaitOutcome::TimedOut,
            },
        };

        match &outcome {
            WaitOutcome::Exited(status) => {
                debug!(pid = self.pid, exit_code = ?status.code(), "renderer ended");
            }
            WaitOutcome::TimedOut => {
                warn!(
                    pid = self.pid,
                    timeout_ms = timeout.as_millis() as u64,
                    "renderer still running after wait timeout"
                );
            }
            WaitOutcome::Cancelled => {
                // The token stays cancelled, so the caller still observes it.
                debug!(pid = self.pid, "wait for renderer abandoned on cancellation");
            }
            WaitOutcome::Failed(e) => {
                warn!(pid = self.pid, error = %e, "waiting for renderer failed");
            }
        }

        outcome
    }

    /// Non-blocking exit status check.
    ///
    /// A renderer that has not exited yet is reported as a failed execution.
    pub fn exit_status(&mut self) -> Result<ExitStatus, RenderError> {
        match self.child.try_wait() {
            Ok(Some(status)) => Ok(status),
            Ok(None) => Err(RenderError::ProcessExecution {
                exit_code: None,
                reason: "renderer has not exited".to_string(),
            }),
            Err(e) => Err(RenderError::ProcessExecution {
                exit_code: None,
                reason: format!("exit status unavailable: {e}"),
            }),
        }
    }

    /// Exit code if the renderer has exited and was not killed by a signal.
    pub fn exit_code(&mut self) -> Option<i32> {
        self.child.try_wait().ok().flatten().and_then(|s| s.code())
    }

    /// Everything the renderer wrote to stderr.
    ///
    /// Kills a still-running renderer first so its stderr reaches EOF, and
    /// gives up after [`STDERR_DRAIN_BUDGET`] in case a grandchild keeps the
    /// pipe open.
    pub async fn diagnostics(&mut self) -> String {
        if matches!(self.child.try_wait(), Ok(None)) {
            if let Err(e) = self.child.start_kill() {
                warn!(pid = self.pid, error = %e, "could not terminate renderer");
            }
        }

        let Some(mut task) = self.stderr_task.take() else {
            return String::new();
        };

        match tokio::time::timeout(STDERR_DRAIN_BUDGET, &mut task).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!(pid = self.pid, error = %e, "renderer stderr reader failed");
                String::new()
            }
            Err(_) => {
                task.abort();
                warn!(pid = self.pid, "timed out reading renderer stderr");
                String::new()
            }
        }
    }
}

impl Drop for RendererProcess {
    fn drop(&mut self) {
        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }

        if !matches!(self.child.try_wait(), Ok(Some(_))) {
            if let Err(e) = self.child.start_kill() {
                debug!(pid = self.pid, error = %e, "renderer already gone on release");
            }
        }

        debug!(pid = self.pid, "renderer process released");
    }
}

/// Read stderr to EOF, one line at a time.
///
/// A read error is logged and yields an empty diagnostic.
async fn read_stderr(stderr: ChildStderr, pid: Option<u32>) -> String {
    let mut segments = BufReader::new(stderr).split(b'\n');
    let mut lines: Vec<String> = Vec::new();

    loop {
        match segments.next_segment().await {
            Ok(Some(segment)) => {
                let line = String::from_utf8_lossy(&segment);
                lines.push(line.trim_end_matches('\r').to_string());
            }
            Ok(None) => return lines.join("\n"),
            Err(e) => {
                error!(pid, error = %e, "could not extract error message from renderer");
                return String::new();
            }
        }
    }
}
