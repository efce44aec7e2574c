//! Stand-in renderer executables.
//!
//! A `FakeRenderer` is a small POSIX `sh` script in a temp directory that
//! records its pid and arguments, writes canned bytes to stdout and stderr,
//! and then exits with a chosen code (or keeps running).

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub struct FakeRendererBuilder {
    stdout: Vec<u8>,
    stderr: String,
    exit_code: i32,
    linger_secs: Option<u32>,
    hold_stderr: bool,
}

impl FakeRendererBuilder {
    pub fn new() -> Self {
        Self {
            stdout: Vec::new(),
            stderr: String::new(),
            exit_code: 0,
            linger_secs: None,
            hold_stderr: false,
        }
    }

    pub fn stdout(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdout = bytes.into();
        self
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.stderr = text.to_string();
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Close stdout/stderr after writing, then keep running for `secs`.
    pub fn linger(mut self, secs: u32) -> Self {
        self.linger_secs = Some(secs);
        self
    }

    /// Leave a background grandchild holding stderr open for 30s, so stderr
    /// never reaches EOF even after the renderer itself is killed.
    pub fn hold_stderr(mut self) -> Self {
        self.hold_stderr = true;
        self
    }

    pub fn build(self) -> FakeRenderer {
        let dir = tempfile::tempdir().expect("creating temp dir for fake renderer");
        let stdout_file = dir.path().join("stdout.bin");
        let stderr_file = dir.path().join("stderr.txt");
        let args_file = dir.path().join("args.txt");
        let pid_file = dir.path().join("pid.txt");
        let path = dir.path().join("renderer.sh");

        fs::write(&stdout_file, &self.stdout).expect("writing fake stdout");
        fs::write(&stderr_file, &self.stderr).expect("writing fake stderr");

        let holder = if self.hold_stderr {
            "sleep 30 >/dev/null </dev/null &\n"
        } else {
            ""
        };

        let tail = match self.linger_secs {
            Some(secs) => format!("exec 1>&- 2>&-\nexec sleep {secs}\n"),
            None => format!("exit {}\n", self.exit_code),
        };

        let script = format!(
            "#!/bin/sh\necho $$ > '{pid}'\nprintf '%s\\n' \"$@\" > '{args}'\ncat '{out}'\ncat '{err}' >&2\n{holder}{tail}",
            pid = pid_file.display(),
            args = args_file.display(),
            out = stdout_file.display(),
            err = stderr_file.display(),
        );
        fs::write(&path, script).expect("writing fake renderer script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("making fake renderer executable");

        FakeRenderer {
            _dir: dir,
            path,
            args_file,
            pid_file,
        }
    }
}

impl Default for FakeRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FakeRenderer {
    _dir: TempDir,
    path: PathBuf,
    args_file: PathBuf,
    pid_file: PathBuf,
}

impl FakeRenderer {
    pub fn builder() -> FakeRendererBuilder {
        FakeRendererBuilder::new()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arguments of the last invocation, one per element.
    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(&self.args_file)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn was_invoked(&self) -> bool {
        self.args_file.exists()
    }

    /// Pid of the last invocation. `exec sleep` keeps the same pid.
    pub fn recorded_pid(&self) -> Option<u32> {
        fs::read_to_string(&self.pid_file)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

/// True once `pid` has exited: either reaped (no `/proc` entry) or a zombie
/// waiting to be reaped.
pub fn process_has_exited(pid: u32) -> bool {
    match fs::read_to_string(format!("/proc/{pid}/stat")) {
        Err(_) => true,
        // The state letter follows the parenthesised command name.
        Ok(stat) => stat
            .rsplit_once(')')
            .map(|(_, rest)| rest.trim_start().starts_with('Z'))
            .unwrap_or(false),
    }
}

/// Poll [`process_has_exited`] for up to `within`.
pub async fn wait_for_exit(pid: u32, within: std::time::Duration) -> bool {
    let deadline = tokio::time::Instant::now() + within;
    loop {
        if process_has_exited(pid) {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}
