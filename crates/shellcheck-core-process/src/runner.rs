//! Run an external command over stdio pipes with a hard timeout.
//!
//! The runner stays runtime-agnostic: stdin is fed and stdout/stderr are drained on background
//! threads while the calling thread polls the child until it exits or the deadline passes.

use shellcheck_core::{DEFAULT_TIMEOUT, InvocationError, ToolOutput};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command as ProcessCommand, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A command line to run, plus what to feed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable path or bare name resolved through `PATH`.
    pub executable: PathBuf,
    /// Directory to run in (inherits the current one when `None`).
    pub working_dir: Option<PathBuf>,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Text written to the child's stdin. When `None` stdin is closed.
    pub input: Option<String>,
    /// Hard limit for the whole run.
    pub timeout: Duration,
}

impl ToolCommand {
    /// Create a command for `executable` with no arguments and the default timeout.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            working_dir: None,
            args: Vec::new(),
            input: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `input` to the child's stdin.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Override the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as it would be typed, for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.executable.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Stdout, decoded lossily as UTF-8.
    pub stdout: String,
    /// Stderr, decoded lossily as UTF-8.
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl From<ProcessOutput> for ToolOutput {
    fn from(output: ProcessOutput) -> Self {
        ToolOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
        }
    }
}

#[derive(Debug, Error)]
/// Failures of [`run_command`].
pub enum ProcessError {
    #[error("failed to start '{command}': {source}")]
    /// The process could not be spawned.
    Spawn {
        /// Rendered command line.
        command: String,
        /// The executable that was attempted.
        executable: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    /// A pipe could not be read or written.
    Io(#[from] io::Error),

    #[error("command '{command}' timed out after {timeout:?}")]
    /// The process did not finish in time. It has been killed and reaped.
    Timeout {
        /// Rendered command line.
        command: String,
        /// The limit that was exceeded.
        timeout: Duration,
        /// Process id of the killed child.
        pid: u32,
    },
}

impl From<ProcessError> for InvocationError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Spawn {
                executable, source, ..
            } if source.kind() == io::ErrorKind::NotFound => {
                InvocationError::MissingExecutable(executable)
            }
            ProcessError::Spawn {
                command, source, ..
            } => InvocationError::Spawn { command, source },
            ProcessError::Io(err) => InvocationError::Io(err),
            ProcessError::Timeout {
                command, timeout, ..
            } => InvocationError::Timeout { command, timeout },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type StreamResult = (Stream, io::Result<Vec<u8>>);

/// Run `command` to completion and capture its output.
///
/// Blocks the calling thread. If the process is still running when `command.timeout` expires
/// it is killed and reaped before [`ProcessError::Timeout`] is returned.
///
/// Only the direct child is killed. A wrapper script that does not `exec` its tool leaves the
/// tool running; it keeps the output pipes open, and the reader threads stay blocked until it
/// exits. The call itself still returns at the deadline without waiting for them.
pub fn run_command(command: &ToolCommand) -> Result<ProcessOutput, ProcessError> {
    let command_line = command.command_line();
    info!(command = %command_line, "running command");

    let mut cmd = ProcessCommand::new(&command.executable);
    cmd.args(&command.args)
        .stdin(if command.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &command.working_dir {
        cmd.current_dir(dir);
    }

    let started = Instant::now();
    let deadline = started + command.timeout;
    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        command: command_line.clone(),
        executable: command.executable.clone(),
        source,
    })?;
    let pid = child.id();
    debug!(pid, "spawned");

    let timed_out = || ProcessError::Timeout {
        command: command_line.clone(),
        timeout: command.timeout,
        pid,
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        terminate(&mut child);
        return Err(io::Error::other("Failed to capture process output").into());
    };

    let writer = match (child.stdin.take(), command.input.clone()) {
        (Some(stdin), Some(input)) => Some(thread::spawn(move || write_input(stdin, input))),
        _ => None,
    };

    let (tx, rx) = mpsc::channel::<StreamResult>();
    spawn_reader(Stream::Stdout, stdout, tx.clone());
    spawn_reader(Stream::Stderr, stderr, tx);

    let status = match wait_until(&mut child, deadline) {
        Ok(Some(status)) => status,
        Ok(None) => {
            warn!(command = %command_line, pid, timeout = ?command.timeout, "timed out, killing");
            terminate(&mut child);
            return Err(timed_out());
        }
        Err(err) => {
            terminate(&mut child);
            return Err(err.into());
        }
    };

    // Grandchildren may still hold the pipes open after the child itself exits.
    let mut stdout_bytes = Vec::new();
    let mut stderr_bytes = Vec::new();
    for _ in 0..2 {
        let remaining = deadline
            .saturating_duration_since(Instant::now())
            .max(POLL_INTERVAL);
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, bytes)) => stdout_bytes = bytes?,
            Ok((Stream::Stderr, bytes)) => stderr_bytes = bytes?,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(command = %command_line, pid, "output pipes still open at deadline");
                return Err(timed_out());
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(io::Error::other("Output reader thread stopped").into());
            }
        }
    }

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => return Err(io::Error::other("Stdin writer thread panicked").into()),
        }
    }

    let output = ProcessOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
        exit_code: status.code(),
    };
    debug!(
        pid,
        exit_code = ?output.exit_code,
        stdout_len = output.stdout.len(),
        stderr_len = output.stderr.len(),
        elapsed = ?started.elapsed(),
        "finished"
    );
    Ok(output)
}

fn write_input(mut stdin: ChildStdin, input: String) -> io::Result<()> {
    // The child may exit without reading all of stdin.
    match stdin.write_all(input.as_bytes()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn spawn_reader<R>(stream: Stream, mut reader: R, tx: mpsc::Sender<StreamResult>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send((stream, result));
    });
}

fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Kill and reap `child`. Its own children are not signalled.
fn terminate(child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(error = %err, "kill failed");
    }
    if let Err(err) = child.wait() {
        warn!(error = %err, "failed to reap child process");
    }
}
