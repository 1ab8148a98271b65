//! Narrow, read-only probes against the OS and external tooling.
//!
//! Each probe answers one question and returns either the raw fact or a
//! [`ProbeError`]. Interpreting the fact is left to the checks.

#![deny(unsafe_code)]

pub mod cgroup;
mod error;
pub mod exec;
pub mod memory;

pub use cgroup::{
    CGROUP_DRIVER_SYSTEMD, CgroupDriverProbe, RuntimeCgroupDriverProbe, parse_cgroup_driver,
};
pub use error::ProbeError;
pub use exec::{
    CommandOutput, CommandRunner, CommandSpec, DEFAULT_COMMAND_TIMEOUT, SystemCommandRunner,
};
pub use memory::{MemoryInfo, MemoryProbe, SysinfoMemoryProbe};
