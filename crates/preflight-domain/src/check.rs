use preflight_types::Diagnostic;

/// A single preflight validation.
///
/// Implementations own whatever parameters and probes they need, are immutable
/// once built, and keep no state between calls. They report at most one
/// diagnostic per independent failure condition and never change the host.
pub trait Check {
    /// Stable identifier, matched against the caller's ignore list.
    fn id(&self) -> &str;

    fn check(&self) -> CheckResult;
}

/// The two-tier outcome of one [`Check::check`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckResult {
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn error(diagnostic: Diagnostic) -> Self {
        Self {
            warnings: Vec::new(),
            errors: vec![diagnostic],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}
