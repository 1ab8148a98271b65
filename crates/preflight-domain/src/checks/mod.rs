use crate::check::Check;
use crate::policy::EffectiveConfig;
use preflight_probe::RuntimeCgroupDriverProbe;

mod cgroup_driver;
mod memory;

#[cfg(test)]
mod tests;

pub use cgroup_driver::{CRI_SETUP_GUIDE_URL, CgroupDriverCheck};
pub use memory::MemoryCheck;

/// Build the enabled checks, in run order, backed by the real host probes.
pub fn registry(cfg: &EffectiveConfig) -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = Vec::new();

    if let Some(policy) = &cfg.memory {
        checks.push(Box::new(MemoryCheck::new(policy.minimum_mb)));
    }
    if let Some(policy) = &cfg.cgroup_driver {
        let probe =
            RuntimeCgroupDriverProbe::new(&policy.runtime).with_timeout(cfg.command_timeout);
        checks.push(Box::new(CgroupDriverCheck::new(probe)));
    }

    checks
}
