use std::time::Duration;
use thiserror::Error;

/// A probe could not produce the fact it was asked for.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to get system info")]
    Sysinfo(#[source] std::io::Error),

    #[error("reading total memory is not supported on this platform")]
    Unsupported,

    #[error("cannot execute '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for '{command}'")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' did not finish within {}ms", timeout.as_millis())]
    Timeout { command: String, timeout: Duration },

    #[error("'{command}' exited with {status}: {stderr}")]
    NonZeroExit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("cannot parse output of '{command}'")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{command}' reported errors: {message}")]
    Runtime { command: String, message: String },

    #[error("output of '{command}' has no {field} field")]
    MissingField {
        command: String,
        field: &'static str,
    },
}

impl ProbeError {
    /// Render the error and its sources as a single `a: b: c` line.
    pub fn chain_message(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}
