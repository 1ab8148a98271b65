use crate::check::{Check, CheckResult};
use preflight_probe::{CGROUP_DRIVER_SYSTEMD, CgroupDriverProbe, RuntimeCgroupDriverProbe};
use preflight_types::{Diagnostic, ids};
use serde_json::json;

pub const CRI_SETUP_GUIDE_URL: &str = "https://kubernetes.io/docs/setup/cri/";

/// Fails unless the container runtime reports the `systemd` cgroup driver.
#[derive(Clone, Debug)]
pub struct CgroupDriverCheck<P = RuntimeCgroupDriverProbe> {
    probe: P,
}

impl<P: CgroupDriverProbe> CgroupDriverCheck<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn expected_driver(&self) -> &'static str {
        CGROUP_DRIVER_SYSTEMD
    }
}

impl<P: CgroupDriverProbe> Check for CgroupDriverCheck<P> {
    fn id(&self) -> &str {
        ids::CHECK_RUNTIME_CGROUP_DRIVER
    }

    fn check(&self) -> CheckResult {
        let driver = match self.probe.detect_cgroup_driver() {
            Ok(driver) => driver,
            Err(err) => {
                return CheckResult::error(Diagnostic::probe(
                    ids::CHECK_RUNTIME_CGROUP_DRIVER,
                    ids::CODE_CGROUP_DRIVER_PROBE_FAILED,
                    err.chain_message(),
                ));
            }
        };

        let expected = self.expected_driver();
        if driver == expected {
            return CheckResult::pass();
        }

        CheckResult::error(
            Diagnostic::policy(
                ids::CHECK_RUNTIME_CGROUP_DRIVER,
                ids::CODE_CGROUP_DRIVER_MISMATCH,
                format!(
                    "detected {driver:?} as the container runtime cgroup driver. \
                     The recommended driver is {expected:?}. \
                     Please follow the guide at {CRI_SETUP_GUIDE_URL}"
                ),
            )
            .with_help(format!(
                "Configure the container runtime to use the {expected} cgroup driver."
            ))
            .with_url(CRI_SETUP_GUIDE_URL)
            .with_data(json!({
                "detected": driver,
                "expected": expected,
            })),
        )
    }
}
