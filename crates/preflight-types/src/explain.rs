//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Whether `--ignore-preflight-errors` can downgrade it.
    pub ignorable: bool,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_HOST_MEMORY => Some(explain_host_memory()),
        ids::CHECK_RUNTIME_CGROUP_DRIVER => Some(explain_cgroup_driver()),

        // Codes
        ids::CODE_MEMORY_BELOW_MINIMUM => Some(explain_memory_below_minimum()),
        ids::CODE_MEMORY_PROBE_FAILED => Some(explain_memory_probe_failed()),
        ids::CODE_CGROUP_DRIVER_MISMATCH => Some(explain_cgroup_driver_mismatch()),
        ids::CODE_CGROUP_DRIVER_PROBE_FAILED => Some(explain_cgroup_driver_probe_failed()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[ids::CHECK_HOST_MEMORY, ids::CHECK_RUNTIME_CGROUP_DRIVER]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MEMORY_BELOW_MINIMUM,
        ids::CODE_MEMORY_PROBE_FAILED,
        ids::CODE_CGROUP_DRIVER_MISMATCH,
        ids::CODE_CGROUP_DRIVER_PROBE_FAILED,
    ]
}

// --- Check-level explanations ---

fn explain_host_memory() -> Explanation {
    Explanation {
        title: "Host Memory",
        description: "\
Reads the total usable memory reported by the kernel and compares it with the
minimum configured for the selected profile (1700 MB for a control-plane node).

Control-plane components run out of memory on smaller hosts, typically while
the first etcd snapshot or API server cache warm-up is in progress.",
        remediation: "\
Add memory to the host, or lower `minimum_mb` under `[checks.\"host.memory\"]`
if you know the workload fits. For throwaway clusters the check can be
downgraded with `--ignore-preflight-errors=host.memory`.",
        ignorable: true,
    }
}

fn explain_cgroup_driver() -> Explanation {
    Explanation {
        title: "Container Runtime Cgroup Driver",
        description: "\
Asks the container runtime which cgroup driver it uses and expects `systemd`.

When the init system is systemd, running a second cgroup manager (`cgroupfs`)
leaves two views of the resource tree, and the kubelet and runtime disagree
under memory pressure.",
        remediation: "\
Configure the runtime to use the systemd cgroup driver, e.g. for Docker set
`\"exec-opts\": [\"native.cgroupdriver=systemd\"]` in /etc/docker/daemon.json
and restart the daemon. See https://kubernetes.io/docs/setup/cri/",
        ignorable: true,
    }
}

// --- Code-level explanations ---

fn explain_memory_below_minimum() -> Explanation {
    let mut exp = explain_host_memory();
    exp.title = "Memory Below Minimum";
    exp
}

fn explain_memory_probe_failed() -> Explanation {
    Explanation {
        title: "Memory Probe Failed",
        description: "\
The `sysinfo` system call failed, so total memory could not be determined.",
        remediation: "\
Check that the process is not running under a seccomp profile that denies
`sysinfo`. This diagnostic cannot be ignored.",
        ignorable: false,
    }
}

fn explain_cgroup_driver_mismatch() -> Explanation {
    let mut exp = explain_cgroup_driver();
    exp.title = "Cgroup Driver Mismatch";
    exp
}

fn explain_cgroup_driver_probe_failed() -> Explanation {
    Explanation {
        title: "Cgroup Driver Probe Failed",
        description: "\
The container runtime CLI could not be executed, exited non-zero, timed out,
or printed output without a `CgroupDriver` field.",
        remediation: "\
Make sure the runtime is installed, its daemon is running and the current user
may talk to it (`docker info` should succeed). Point `runtime` under
`[checks.\"runtime.cgroup_driver\"]` at the right binary if it is not on PATH.
This diagnostic cannot be ignored.",
        ignorable: false,
    }
}
