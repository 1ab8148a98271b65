//! Use case orchestration for preflight.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;

pub use check::{
    EXIT_FAIL, EXIT_OK, EXIT_RUNTIME_ERROR, PreflightInput, PreflightOutput, build_report,
    run_preflight, runtime_error_report, verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{OutputFormat, render_report, serialize_report, write_report, write_text};
