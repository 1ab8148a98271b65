use crate::cancel::CancelToken;
use crate::check::{Check, CheckResult};
use preflight_probe::{CgroupDriverProbe, MemoryInfo, MemoryProbe, ProbeError};
use preflight_types::Diagnostic;
use std::cell::Cell;
use std::rc::Rc;

/// A check with a canned result, for exercising the runner.
pub struct StaticCheck {
    id: String,
    result: CheckResult,
    calls: Option<Rc<Cell<u32>>>,
    cancel_after: Option<CancelToken>,
}

impl StaticCheck {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            result: CheckResult::pass(),
            calls: None,
            cancel_after: None,
        }
    }

    pub fn warning(mut self, message: &str) -> Self {
        let d = Diagnostic::policy(&self.id, "test_warning", message);
        self.result.warnings.push(d);
        self
    }

    pub fn error_policy(mut self, message: &str) -> Self {
        let d = Diagnostic::policy(&self.id, "test_policy", message);
        self.result.errors.push(d);
        self
    }

    pub fn error_probe(mut self, message: &str) -> Self {
        let d = Diagnostic::probe(&self.id, "test_probe", message);
        self.result.errors.push(d);
        self
    }

    pub fn with_error(mut self, diagnostic: Diagnostic) -> Self {
        self.result.errors.push(diagnostic);
        self
    }

    pub fn counting(mut self, calls: Rc<Cell<u32>>) -> Self {
        self.calls = Some(calls);
        self
    }

    /// Trip `token` while running, as a signal handler would.
    pub fn cancelling(mut self, token: CancelToken) -> Self {
        self.cancel_after = Some(token);
        self
    }
}

impl Check for StaticCheck {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> CheckResult {
        if let Some(calls) = &self.calls {
            calls.set(calls.get() + 1);
        }
        if let Some(token) = &self.cancel_after {
            token.cancel();
        }
        self.result.clone()
    }
}

pub fn boxed(checks: Vec<StaticCheck>) -> Vec<Box<dyn Check>> {
    checks
        .into_iter()
        .map(|c| Box::new(c) as Box<dyn Check>)
        .collect()
}

/// Memory probe returning fixed figures, or failing when `info` is `None`.
pub struct FakeMemoryProbe {
    pub info: Option<MemoryInfo>,
}

impl FakeMemoryProbe {
    pub fn megabytes(mb: u64) -> Self {
        Self::units(mb * 256, 4096)
    }

    pub fn units(total_units: u64, unit_size: u64) -> Self {
        Self {
            info: Some(MemoryInfo {
                total_units,
                unit_size,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { info: None }
    }
}

impl MemoryProbe for FakeMemoryProbe {
    fn read_memory_info(&self) -> Result<MemoryInfo, ProbeError> {
        self.info.ok_or_else(|| {
            ProbeError::Sysinfo(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "operation not permitted",
            ))
        })
    }
}

/// Cgroup driver probe returning a fixed driver, or a simulated non-zero exit.
pub struct FakeCgroupDriverProbe {
    pub driver: Option<String>,
}

impl FakeCgroupDriverProbe {
    pub fn driver(driver: &str) -> Self {
        Self {
            driver: Some(driver.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { driver: None }
    }
}

impl CgroupDriverProbe for FakeCgroupDriverProbe {
    fn detect_cgroup_driver(&self) -> Result<String, ProbeError> {
        self.driver.clone().ok_or_else(|| ProbeError::NonZeroExit {
            command: "docker info --format {{json .}}".to_string(),
            status: "exit status 1".to_string(),
            stderr: "Cannot connect to the Docker daemon".to_string(),
        })
    }
}
