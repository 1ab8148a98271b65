use crate::CancelToken;
use preflight_probe::DEFAULT_COMMAND_TIMEOUT;
use preflight_types::ids;
use std::collections::BTreeSet;
use std::num::NonZeroU64;
use std::time::Duration;

/// Check identifiers whose policy errors are downgraded to warnings.
///
/// Matching is case-insensitive. The keyword `all` matches every check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IgnorableSet {
    ids: BTreeSet<String>,
}

impl IgnorableSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = ids
            .into_iter()
            .map(|s| s.as_ref().trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { ids }
    }

    pub fn contains(&self, check_id: &str) -> bool {
        self.ids.contains(ids::IGNORE_ALL) || self.ids.contains(&check_id.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn extend<I, S>(&mut self, more: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ids.extend(Self::new(more).ids);
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnorableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Per-run inputs to [`crate::run_checks`] besides the checks themselves.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub ignorable: IgnorableSet,
    pub cancel: Option<CancelToken>,
}

impl RunOptions {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryPolicy {
    pub minimum_mb: NonZeroU64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CgroupDriverPolicy {
    /// Runtime CLI to query, e.g. `docker`.
    pub runtime: String,
}

/// Fully resolved configuration: which checks run and with what parameters.
///
/// A `None` policy means the check is disabled.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub ignorable: IgnorableSet,
    pub command_timeout: Duration,
    pub memory: Option<MemoryPolicy>,
    pub cgroup_driver: Option<CgroupDriverPolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            ignorable: IgnorableSet::default(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            memory: None,
            cgroup_driver: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let set = IgnorableSet::new([" Host.Memory ", ""]);
        assert!(set.contains("host.memory"));
        assert!(set.contains("HOST.MEMORY"));
        assert!(!set.contains("runtime.cgroup_driver"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["host.memory"]);
    }

    #[test]
    fn all_matches_everything() {
        let set: IgnorableSet = ["ALL"].into_iter().collect();
        assert!(set.contains("host.memory"));
        assert!(set.contains("anything.else"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = IgnorableSet::default();
        assert!(set.is_empty());
        assert!(!set.contains("host.memory"));
    }

    #[test]
    fn extend_merges_sources() {
        let mut set = IgnorableSet::new(["host.memory"]);
        set.extend(["runtime.cgroup_driver", "host.memory"]);
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn options_without_token_are_not_cancelled() {
        assert!(!RunOptions::default().is_cancelled());

        let token = CancelToken::new();
        let opts = RunOptions {
            cancel: Some(token.clone()),
            ..RunOptions::default()
        };
        token.cancel();
        assert!(opts.is_cancelled());
    }
}
