use crate::model::{CheckConfig, PreflightConfigV1};
use crate::presets::{self, PROFILE_CONTROL_PLANE};
use anyhow::Context;
use preflight_domain::policy::{EffectiveConfig, IgnorableSet};
use preflight_types::{explain, ids};
use std::num::NonZeroU64;
use std::time::Duration;

/// Values supplied on the command line; they win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    /// Merged with the file's list rather than replacing it.
    pub ignore_preflight_errors: Vec<String>,
    pub minimum_mb: Option<u64>,
    pub runtime: Option<String>,
    pub command_timeout_ms: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PreflightConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| PROFILE_CONTROL_PLANE.to_string());

    let mut effective = presets::preset(&profile);

    // command timeout
    if let Some(ms) = overrides.command_timeout_ms.or(cfg.command_timeout_ms) {
        if ms == 0 {
            anyhow::bail!("command_timeout_ms must be greater than zero");
        }
        effective.command_timeout = Duration::from_millis(ms);
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        apply_check_config(&mut effective, check_id, cc)
            .with_context(|| format!("invalid config for check {check_id}"))?;
    }

    // CLI overrides only tune checks that are enabled.
    if let Some(mb) = overrides.minimum_mb {
        let minimum_mb = parse_minimum_mb(mb).context("invalid --min-memory-mb")?;
        if let Some(memory) = effective.memory.as_mut() {
            memory.minimum_mb = minimum_mb;
        }
    }
    if let Some(runtime) = overrides.runtime.as_deref() {
        let runtime = parse_runtime(runtime).context("invalid --runtime")?;
        if let Some(cgroup) = effective.cgroup_driver.as_mut() {
            cgroup.runtime = runtime;
        }
    }

    // ignore list: file + CLI
    let ignore: Vec<String> = cfg
        .ignore_preflight_errors
        .iter()
        .chain(overrides.ignore_preflight_errors.iter())
        .cloned()
        .collect();
    effective.ignorable = parse_ignore_list(&ignore)?;

    Ok(ResolvedConfig { effective })
}

fn apply_check_config(
    effective: &mut EffectiveConfig,
    check_id: &str,
    cc: &CheckConfig,
) -> anyhow::Result<()> {
    match check_id {
        ids::CHECK_HOST_MEMORY => {
            if cc.runtime.is_some() {
                anyhow::bail!("`runtime` is not a {check_id} setting");
            }
            match cc.enabled {
                Some(false) => effective.memory = None,
                Some(true) if effective.memory.is_none() => {
                    effective.memory = Some(presets::default_memory_policy());
                }
                _ => {}
            }
            if let Some(mb) = cc.minimum_mb {
                let minimum_mb = parse_minimum_mb(mb)?;
                if let Some(memory) = effective.memory.as_mut() {
                    memory.minimum_mb = minimum_mb;
                }
            }
        }
        ids::CHECK_RUNTIME_CGROUP_DRIVER => {
            if cc.minimum_mb.is_some() {
                anyhow::bail!("`minimum_mb` is not a {check_id} setting");
            }
            match cc.enabled {
                Some(false) => effective.cgroup_driver = None,
                Some(true) if effective.cgroup_driver.is_none() => {
                    effective.cgroup_driver = Some(presets::default_cgroup_driver_policy());
                }
                _ => {}
            }
            if let Some(runtime) = cc.runtime.as_deref() {
                let runtime = parse_runtime(runtime)?;
                if let Some(cgroup) = effective.cgroup_driver.as_mut() {
                    cgroup.runtime = runtime;
                }
            }
        }
        other => anyhow::bail!(
            "unknown check id: {other} (expected one of: {})",
            explain::all_check_ids().join(", ")
        ),
    }
    Ok(())
}

fn parse_minimum_mb(mb: u64) -> anyhow::Result<NonZeroU64> {
    NonZeroU64::new(mb).context("minimum_mb must be greater than zero")
}

fn parse_runtime(v: &str) -> anyhow::Result<String> {
    let v = v.trim();
    if v.is_empty() {
        anyhow::bail!("runtime must not be empty");
    }
    Ok(v.to_string())
}

fn parse_ignore_list(entries: &[String]) -> anyhow::Result<IgnorableSet> {
    let set = IgnorableSet::new(entries);
    let known = explain::all_check_ids();

    let mut has_all = false;
    let mut others = 0;
    for id in set.iter() {
        if id == ids::IGNORE_ALL {
            has_all = true;
            continue;
        }
        others += 1;
        if !known.contains(&id) {
            anyhow::bail!(
                "unknown check id in ignore_preflight_errors: {id} (expected 'all' or one of: {})",
                known.join(", ")
            );
        }
    }
    if has_all && others > 0 {
        anyhow::bail!("ignore_preflight_errors: don't combine 'all' with specific check ids");
    }

    Ok(set)
}
