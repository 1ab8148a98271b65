//! Process execution seam for probes that shell out.

use crate::ProbeError;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A command line plus the deadline it must finish within.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Human-readable command line used in error messages.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn status_display(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {code}"),
            None => "a signal".to_string(),
        }
    }
}

/// Runs a command to completion. A non-zero exit is not an error at this layer.
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError>;
}

/// Spawns real processes and kills them once their deadline passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProbeError> {
        let command = spec.display();
        tracing::debug!(%command, timeout_ms = spec.timeout.as_millis() as u64, "spawning");

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Drain both pipes concurrently so a chatty child cannot block on a full buffer.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let started = Instant::now();
        let deadline = started + spec.timeout;
        let status: ExitStatus = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    reap(&mut child);
                    tracing::warn!(%command, "killed after deadline");
                    return Err(timeout(spec, command));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    reap(&mut child);
                    return Err(ProbeError::Wait { command, source });
                }
            }
        };

        // A grandchild may still hold the pipes open after the child exits.
        let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
        else {
            tracing::warn!(%command, "output still open after deadline");
            return Err(timeout(spec, command));
        };

        let output = CommandOutput {
            success: status.success(),
            code: status.code(),
            stdout,
            stderr,
        };
        tracing::debug!(
            %command,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = output.success,
            "finished"
        );
        Ok(output)
    }
}

/// Kill the child and collect its exit status so it is not left running.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn timeout(spec: &CommandSpec, command: String) -> ProbeError {
    ProbeError::Timeout {
        command,
        timeout: spec.timeout,
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Wait for a pipe to reach EOF, but no later than `deadline`. `None` means time ran out.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<Vec<u8>> {
    let Some(rx) = rx else {
        return Some(Vec::new());
    };
    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
    }
}
