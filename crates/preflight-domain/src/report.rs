use preflight_types::{Diagnostic, Verdict};

/// Aggregate outcome of one run.
///
/// `warnings` holds every check's native warnings in registration order,
/// followed by errors that were downgraded by the ignore list.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
    pub checks_registered: u32,
    pub checks_run: u32,
    pub errors_downgraded: u32,
    pub cancelled: bool,
}

impl DomainReport {
    /// Whether the calling operation may proceed.
    pub fn is_success(&self) -> bool {
        self.verdict != Verdict::Fail
    }
}
