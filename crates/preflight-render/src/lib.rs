//! Renderers for preflight reports.
//!
//! Both renderers are pure functions of the report; ordering follows the report.

#![forbid(unsafe_code)]

mod markdown;
mod text;

pub use markdown::render_markdown;
pub use text::render_text;
