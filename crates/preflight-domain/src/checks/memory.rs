use crate::check::{Check, CheckResult};
use preflight_probe::{MemoryProbe, SysinfoMemoryProbe};
use preflight_types::{Diagnostic, ids};
use serde_json::json;
use std::num::NonZeroU64;

/// Fails when total memory is below `minimum_mb`. Never warns.
#[derive(Clone, Debug)]
pub struct MemoryCheck<P = SysinfoMemoryProbe> {
    minimum_mb: NonZeroU64,
    probe: P,
}

impl MemoryCheck {
    pub fn new(minimum_mb: NonZeroU64) -> Self {
        Self::with_probe(minimum_mb, SysinfoMemoryProbe)
    }
}

impl<P: MemoryProbe> MemoryCheck<P> {
    pub fn with_probe(minimum_mb: NonZeroU64, probe: P) -> Self {
        Self { minimum_mb, probe }
    }

    pub fn minimum_mb(&self) -> u64 {
        self.minimum_mb.get()
    }
}

impl<P: MemoryProbe> Check for MemoryCheck<P> {
    fn id(&self) -> &str {
        ids::CHECK_HOST_MEMORY
    }

    fn check(&self) -> CheckResult {
        let info = match self.probe.read_memory_info() {
            Ok(info) => info,
            Err(err) => {
                return CheckResult::error(Diagnostic::probe(
                    ids::CHECK_HOST_MEMORY,
                    ids::CODE_MEMORY_PROBE_FAILED,
                    err.chain_message(),
                ));
            }
        };

        let actual = info.total_mb();
        let minimum = self.minimum_mb();
        if actual >= minimum {
            return CheckResult::pass();
        }

        CheckResult::error(
            Diagnostic::policy(
                ids::CHECK_HOST_MEMORY,
                ids::CODE_MEMORY_BELOW_MINIMUM,
                format!("the system RAM ({actual} MB) is less than the minimum {minimum} MB"),
            )
            .with_help(format!("Provide at least {minimum} MB of memory to this host."))
            .with_data(json!({
                "actual_mb": actual,
                "minimum_mb": minimum,
                "total_units": info.total_units,
                "unit_size": info.unit_size,
            })),
        )
    }
}
