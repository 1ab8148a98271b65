//! Config parsing and profile resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CheckConfig, PreflightConfigV1};
pub use presets::{
    CONTROL_PLANE_MIN_MEMORY_MB, DEFAULT_RUNTIME, PROFILE_CONTROL_PLANE, PROFILE_NODE,
};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `preflight.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PreflightConfigV1> {
    let cfg: PreflightConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the runner (profile + file + overrides).
pub fn resolve_config(
    cfg: PreflightConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
