//! Check evaluation and aggregation.
//!
//! Input: an ordered list of checks and the caller's ignore list.
//! Output: warnings + hard errors + verdict.

#![forbid(unsafe_code)]

pub mod cancel;
pub mod check;
pub mod checks;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use cancel::CancelToken;
pub use check::{Check, CheckResult};
pub use engine::run_checks;
pub use policy::{EffectiveConfig, IgnorableSet, RunOptions};
pub use report::DomainReport;
