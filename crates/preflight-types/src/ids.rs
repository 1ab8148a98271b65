//! Stable identifiers for checks and diagnostic codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_HOST_MEMORY: &str = "host.memory";
pub const CHECK_RUNTIME_CGROUP_DRIVER: &str = "runtime.cgroup_driver";

// Codes: host.memory
pub const CODE_MEMORY_BELOW_MINIMUM: &str = "memory_below_minimum";
pub const CODE_MEMORY_PROBE_FAILED: &str = "memory_probe_failed";

// Codes: runtime.cgroup_driver
pub const CODE_CGROUP_DRIVER_MISMATCH: &str = "cgroup_driver_mismatch";
pub const CODE_CGROUP_DRIVER_PROBE_FAILED: &str = "cgroup_driver_probe_failed";

// Ignore-list keyword matching every check.
pub const IGNORE_ALL: &str = "all";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
