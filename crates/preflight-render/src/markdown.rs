use preflight_types::{PreflightReport, Severity, Verdict};

pub fn render_markdown(report: &PreflightReport) -> String {
    let mut out = String::new();

    out.push_str("# Preflight report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: `{}`\n- Checks: {} run / {} registered\n",
        verdict, report.data.profile, report.data.checks_run, report.data.checks_registered
    ));
    if report.data.errors_downgraded > 0 {
        out.push_str(&format!(
            "- Downgraded by ignore list: {}\n",
            report.data.errors_downgraded
        ));
    }
    out.push('\n');

    if report.data.cancelled {
        out.push_str("> Note: run cancelled before all checks completed\n\n");
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        out.push_str("No diagnostics.\n");
        return out;
    }

    out.push_str("## Diagnostics\n\n");

    for (severity, d) in report.diagnostics() {
        let sev = match severity {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        out.push_str(&format!(
            "- [{}] `{}` / `{}`: {}\n",
            sev, d.check_id, d.code, d.message
        ));
        if let Some(help) = &d.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
        if let Some(url) = &d.url {
            out.push_str(&format!("  - url: {}\n", url));
        }
    }

    out
}
