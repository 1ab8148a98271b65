use preflight_types::{Diagnostic, DiagnosticClass, PreflightReport, Verdict};

/// Terminal output in the familiar `[WARNING id]: message` shape.
pub fn render_text(report: &PreflightReport) -> String {
    let mut out = String::new();

    out.push_str("[preflight] Running pre-flight checks\n");
    for w in &report.warnings {
        push_line(&mut out, "WARNING", w);
    }

    if report.data.cancelled {
        out.push_str(&format!(
            "[preflight] Run cancelled after {} of {} checks\n",
            report.data.checks_run, report.data.checks_registered
        ));
    }

    if report.errors.is_empty() {
        match report.verdict {
            Verdict::Fail => out.push_str("[preflight] Pre-flight checks did not complete\n"),
            _ => out.push_str("[preflight] All pre-flight checks passed\n"),
        }
        return out;
    }

    out.push_str("[preflight] Some fatal errors occurred:\n");
    for e in &report.errors {
        push_line(&mut out, "ERROR", e);
    }

    let ignorable: Vec<&str> = report
        .errors
        .iter()
        .filter(|e| e.class == DiagnosticClass::Policy)
        .map(|e| e.check_id.as_str())
        .collect();
    if !ignorable.is_empty() {
        out.push_str(&format!(
            "[preflight] If you know what you are doing, you can make a check non-fatal with `--ignore-preflight-errors={}`\n",
            ignorable.join(",")
        ));
    }

    out
}

fn push_line(out: &mut String, level: &str, d: &Diagnostic) {
    out.push_str(&format!("\t[{} {}]: {}\n", level, d.check_id, d.message));
}
