//! Container runtime cgroup driver detection.

use crate::ProbeError;
use crate::exec::{CommandRunner, CommandSpec, DEFAULT_COMMAND_TIMEOUT, SystemCommandRunner};
use serde_json::Value;
use std::time::Duration;

pub const CGROUP_DRIVER_SYSTEMD: &str = "systemd";

const FIELD_CGROUP_DRIVER: &str = "CgroupDriver";
const FIELD_SERVER_ERRORS: &str = "ServerErrors";

pub trait CgroupDriverProbe {
    fn detect_cgroup_driver(&self) -> Result<String, ProbeError>;
}

/// Asks a Docker-compatible runtime CLI for its cgroup driver via
/// `<runtime> info --format '{{json .}}'`.
#[derive(Clone, Debug)]
pub struct RuntimeCgroupDriverProbe<R = SystemCommandRunner> {
    runtime: String,
    timeout: Duration,
    runner: R,
}

impl RuntimeCgroupDriverProbe {
    pub fn new(runtime: impl Into<String>) -> Self {
        Self::with_runner(runtime, SystemCommandRunner)
    }
}

impl<R: CommandRunner> RuntimeCgroupDriverProbe<R> {
    pub fn with_runner(runtime: impl Into<String>, runner: R) -> Self {
        Self {
            runtime: runtime.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
            runner,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn info_command(&self) -> CommandSpec {
        CommandSpec::new(&self.runtime, ["info", "--format", "{{json .}}"]).with_timeout(self.timeout)
    }
}

impl<R: CommandRunner> CgroupDriverProbe for RuntimeCgroupDriverProbe<R> {
    fn detect_cgroup_driver(&self) -> Result<String, ProbeError> {
        let spec = self.info_command();
        let output = self.runner.run(&spec)?;
        if !output.success {
            return Err(ProbeError::NonZeroExit {
                command: spec.display(),
                status: output.status_display(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let driver = parse_cgroup_driver(&spec.display(), &output.stdout)?;
        tracing::debug!(runtime = %self.runtime, %driver, "detected cgroup driver");
        Ok(driver)
    }
}

/// Extract the `CgroupDriver` field from `info` JSON output.
///
/// The value is trimmed but otherwise returned verbatim; deciding whether it is
/// acceptable is the caller's job.
pub fn parse_cgroup_driver(command: &str, stdout: &[u8]) -> Result<String, ProbeError> {
    let doc: Value = serde_json::from_slice(stdout).map_err(|source| ProbeError::Parse {
        command: command.to_string(),
        source,
    })?;

    let driver = doc
        .get(FIELD_CGROUP_DRIVER)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty());

    match driver {
        Some(d) => Ok(d.to_string()),
        None => match server_errors(&doc) {
            Some(message) => Err(ProbeError::Runtime {
                command: command.to_string(),
                message,
            }),
            None => Err(ProbeError::MissingField {
                command: command.to_string(),
                field: FIELD_CGROUP_DRIVER,
            }),
        },
    }
}

// With the daemon down, some CLI versions still exit 0 and list the problem here.
fn server_errors(doc: &Value) -> Option<String> {
    let errors: Vec<&str> = doc
        .get(FIELD_SERVER_ERRORS)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if errors.is_empty() {
        None
    } else {
        Some(errors.join("; "))
    }
}
