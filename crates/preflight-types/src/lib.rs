//! Stable DTOs and IDs used across the preflight workspace.
//!
//! This crate is intentionally boring:
//! - data types for diagnostics and the emitted report
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{Explanation, lookup_explanation};
pub use receipt::{
    Diagnostic, DiagnosticClass, PreflightData, PreflightReport, SCHEMA_REPORT_V1, Severity,
    ToolMeta, Verdict,
};
