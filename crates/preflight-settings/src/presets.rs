use preflight_domain::policy::{CgroupDriverPolicy, EffectiveConfig, MemoryPolicy};
use std::num::NonZeroU64;

pub const PROFILE_CONTROL_PLANE: &str = "control-plane";
pub const PROFILE_NODE: &str = "node";

pub const CONTROL_PLANE_MIN_MEMORY_MB: u64 = 1700;
const CONTROL_PLANE_MIN_MEMORY: NonZeroU64 = NonZeroU64::new(CONTROL_PLANE_MIN_MEMORY_MB).unwrap();
pub const DEFAULT_RUNTIME: &str = "docker";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything else belongs in the config file.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        PROFILE_NODE => node_profile(),
        // default
        _ => control_plane_profile(),
    }
}

pub(crate) fn default_memory_policy() -> MemoryPolicy {
    MemoryPolicy {
        minimum_mb: CONTROL_PLANE_MIN_MEMORY,
    }
}

pub(crate) fn default_cgroup_driver_policy() -> CgroupDriverPolicy {
    CgroupDriverPolicy {
        runtime: DEFAULT_RUNTIME.to_string(),
    }
}

fn control_plane_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: PROFILE_CONTROL_PLANE.to_string(),
        memory: Some(default_memory_policy()),
        cgroup_driver: Some(default_cgroup_driver_policy()),
        ..EffectiveConfig::default()
    }
}

fn node_profile() -> EffectiveConfig {
    // Worker nodes have no memory floor; only the runtime has to agree with the kubelet.
    EffectiveConfig {
        profile: PROFILE_NODE.to_string(),
        memory: None,
        cgroup_driver: Some(default_cgroup_driver_policy()),
        ..EffectiveConfig::default()
    }
}
