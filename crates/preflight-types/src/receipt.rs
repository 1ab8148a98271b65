use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for preflight reports.
pub const SCHEMA_REPORT_V1: &str = "preflight.report.v1";

/// Severity is intentionally small: a diagnostic either blocks the bootstrap or it does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Which failure class produced a diagnostic.
///
/// Only `Policy` diagnostics may be downgraded by an ignore list. A `Probe`
/// diagnostic means the fact could not be determined at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticClass {
    Probe,
    Policy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    pub check_id: String,
    pub code: String,
    pub class: DiagnosticClass,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Check-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

impl Diagnostic {
    pub fn probe(check_id: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(check_id, code, DiagnosticClass::Probe, message)
    }

    pub fn policy(check_id: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(check_id, code, DiagnosticClass::Policy, message)
    }

    fn new(check_id: &str, code: &str, class: DiagnosticClass, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            code: code.to_string(),
            class,
            message: message.into(),
            help: None,
            url: None,
            data: JsonValue::Null,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = data;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Preflight-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PreflightData {
    pub profile: String,
    pub checks_registered: u32,
    pub checks_run: u32,

    /// Errors reclassified as warnings by the ignore list.
    pub errors_downgraded: u32,

    #[serde(default)]
    pub ignored_checks: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

/// The JSON report emitted by `preflight check`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreflightReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub warnings: Vec<Diagnostic>,
    pub errors: Vec<Diagnostic>,
    pub data: PreflightData,
}

impl PreflightReport {
    /// Iterate every diagnostic with the severity it was reported at.
    pub fn diagnostics(&self) -> impl Iterator<Item = (Severity, &Diagnostic)> {
        self.errors
            .iter()
            .map(|d| (Severity::Error, d))
            .chain(self.warnings.iter().map(|d| (Severity::Warning, d)))
    }
}
