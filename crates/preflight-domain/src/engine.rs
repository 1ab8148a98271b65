use crate::check::Check;
use crate::policy::RunOptions;
use crate::report::DomainReport;
use preflight_types::{Diagnostic, DiagnosticClass, Verdict};
use std::time::Instant;

/// Run every check once, in order, and aggregate the results.
///
/// A failing check never stops later ones. Once all checks have run, errors
/// owned by a check on the ignore list are moved to the warnings, unless they
/// are probe failures: a fact that could not be determined is never ignorable.
pub fn run_checks(checks: &[Box<dyn Check>], options: &RunOptions) -> DomainReport {
    let mut warnings: Vec<Diagnostic> = Vec::new();
    let mut owned_errors: Vec<(&str, Diagnostic)> = Vec::new();
    let mut checks_run: u32 = 0;
    let mut cancelled = false;

    for (idx, check) in checks.iter().enumerate() {
        if options.is_cancelled() {
            tracing::warn!(
                skipped = checks.len() - idx,
                "preflight run cancelled; skipping remaining checks"
            );
            cancelled = true;
            break;
        }

        let started = Instant::now();
        let result = check.check();
        checks_run += 1;

        tracing::debug!(
            check = check.id(),
            warnings = result.warnings.len(),
            errors = result.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "check finished"
        );

        warnings.extend(result.warnings);
        owned_errors.extend(result.errors.into_iter().map(|e| (check.id(), e)));
    }

    let mut errors = Vec::new();
    let mut errors_downgraded: u32 = 0;
    for (owner, err) in owned_errors {
        if err.class == DiagnosticClass::Policy && options.ignorable.contains(owner) {
            tracing::info!(check = owner, code = %err.code, "error downgraded to warning");
            warnings.push(err);
            errors_downgraded += 1;
        } else {
            errors.push(err);
        }
    }

    let verdict = compute_verdict(&warnings, &errors, cancelled);
    tracing::info!(
        ?verdict,
        checks_run,
        warnings = warnings.len(),
        errors = errors.len(),
        "preflight checks complete"
    );

    DomainReport {
        verdict,
        warnings,
        errors,
        checks_registered: checks.len() as u32,
        checks_run,
        errors_downgraded,
        cancelled,
    }
}

fn compute_verdict(warnings: &[Diagnostic], errors: &[Diagnostic], cancelled: bool) -> Verdict {
    if cancelled || !errors.is_empty() {
        return Verdict::Fail;
    }
    if !warnings.is_empty() {
        return Verdict::Warn;
    }
    Verdict::Pass
}
