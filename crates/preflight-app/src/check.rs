//! The `check` use case: resolve config, run the checks, produce a report.

use anyhow::Context;
use preflight_domain::policy::{EffectiveConfig, RunOptions};
use preflight_domain::{CancelToken, DomainReport};
use preflight_settings::{Overrides, ResolvedConfig};
use preflight_types::{
    Diagnostic, PreflightData, PreflightReport, SCHEMA_REPORT_V1, ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub const EXIT_OK: i32 = 0;
pub const EXIT_RUNTIME_ERROR: i32 = 1;
pub const EXIT_FAIL: i32 = 2;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct PreflightInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Checked between checks; a tripped token fails the run.
    pub cancel: Option<CancelToken>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct PreflightOutput {
    /// The generated report.
    pub report: PreflightReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, build the registry, run it, produce a report.
pub fn run_preflight(input: PreflightInput<'_>) -> anyhow::Result<PreflightOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        preflight_settings::PreflightConfigV1::default()
    } else {
        preflight_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = preflight_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let checks = preflight_domain::checks::registry(&resolved.effective);
    tracing::info!(
        profile = %resolved.effective.profile,
        checks = checks.len(),
        "running pre-flight checks"
    );

    let options = RunOptions {
        ignorable: resolved.effective.ignorable.clone(),
        cancel: input.cancel,
    };
    let domain_report = preflight_domain::run_checks(&checks, &options);

    let finished_at = OffsetDateTime::now_utc();
    let report = build_report(&resolved.effective, domain_report, started_at, finished_at);

    Ok(PreflightOutput {
        report,
        resolved_config: resolved,
    })
}

/// Wrap a domain report in the versioned envelope.
pub fn build_report(
    cfg: &EffectiveConfig,
    domain: DomainReport,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> PreflightReport {
    let DomainReport {
        verdict,
        warnings,
        errors,
        checks_registered,
        checks_run,
        errors_downgraded,
        cancelled,
    } = domain;

    PreflightReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at,
        verdict,
        warnings,
        errors,
        data: PreflightData {
            profile: cfg.profile.clone(),
            checks_registered,
            checks_run,
            errors_downgraded,
            ignored_checks: cfg.ignorable.iter().map(str::to_string).collect(),
            cancelled,
        },
    }
}

/// A failing report for errors that happened before any check could run.
pub fn runtime_error_report(message: &str) -> PreflightReport {
    let now = OffsetDateTime::now_utc();
    PreflightReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        warnings: Vec::new(),
        errors: vec![Diagnostic::probe(
            ids::CHECK_TOOL_RUNTIME,
            ids::CODE_RUNTIME_ERROR,
            message,
        )],
        data: PreflightData::default(),
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "preflight".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => EXIT_OK,
        Verdict::Warn => EXIT_OK,
        Verdict::Fail => EXIT_FAIL,
    }
}
