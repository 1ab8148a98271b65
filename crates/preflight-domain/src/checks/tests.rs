use super::{CRI_SETUP_GUIDE_URL, CgroupDriverCheck, MemoryCheck, registry};
use crate::check::Check;
use crate::engine::run_checks;
use crate::policy::{
    CgroupDriverPolicy, EffectiveConfig, IgnorableSet, MemoryPolicy, RunOptions,
};
use crate::test_support::{FakeCgroupDriverProbe, FakeMemoryProbe};
use preflight_types::{DiagnosticClass, Verdict, ids};
use std::num::NonZeroU64;

fn mb(v: u64) -> NonZeroU64 {
    NonZeroU64::new(v).expect("non-zero")
}

#[test]
fn memory_above_minimum_passes() {
    let check = MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::megabytes(2048));
    let result = check.check();
    assert!(result.is_clean());
}

#[test]
fn memory_equal_to_minimum_passes() {
    let check = MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::megabytes(1700));
    assert!(check.check().is_clean());
}

#[test]
fn memory_below_minimum_reports_both_values() {
    let check = MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::megabytes(1024));
    let result = check.check();

    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(err.check_id, ids::CHECK_HOST_MEMORY);
    assert_eq!(err.code, ids::CODE_MEMORY_BELOW_MINIMUM);
    assert_eq!(err.class, DiagnosticClass::Policy);
    assert_eq!(
        err.message,
        "the system RAM (1024 MB) is less than the minimum 1700 MB"
    );
    assert_eq!(err.data["actual_mb"], 1024);
    assert_eq!(err.data["minimum_mb"], 1700);
}

#[test]
fn memory_is_truncated_not_rounded() {
    // 1699.99 MB must count as 1699 and fail a 1700 MB minimum.
    let bytes = 1700 * 1024 * 1024 - 1;
    let check = MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::units(bytes, 1));
    let result = check.check();
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("(1699 MB)"));
}

#[test]
fn zero_memory_fails_with_the_standard_error() {
    let check = MemoryCheck::with_probe(mb(1), FakeMemoryProbe::units(0, 4096));
    let result = check.check();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ids::CODE_MEMORY_BELOW_MINIMUM);
}

#[test]
fn memory_probe_failure_is_a_single_probe_error() {
    let check = MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::failing());
    let result = check.check();

    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(err.class, DiagnosticClass::Probe);
    assert_eq!(err.code, ids::CODE_MEMORY_PROBE_FAILED);
    assert_eq!(
        err.message,
        "failed to get system info: operation not permitted"
    );
}

#[test]
fn systemd_driver_passes() {
    let check = CgroupDriverCheck::new(FakeCgroupDriverProbe::driver("systemd"));
    assert!(check.check().is_clean());
}

#[test]
fn cgroupfs_driver_is_one_error_naming_both_drivers() {
    let check = CgroupDriverCheck::new(FakeCgroupDriverProbe::driver("cgroupfs"));
    let result = check.check();

    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(err.class, DiagnosticClass::Policy);
    assert_eq!(err.code, ids::CODE_CGROUP_DRIVER_MISMATCH);
    assert!(err.message.contains("\"cgroupfs\""));
    assert!(err.message.contains("\"systemd\""));
    assert!(err.message.contains(CRI_SETUP_GUIDE_URL));
    assert_eq!(err.url.as_deref(), Some(CRI_SETUP_GUIDE_URL));
}

#[test]
fn driver_comparison_is_case_sensitive() {
    let check = CgroupDriverCheck::new(FakeCgroupDriverProbe::driver("Systemd"));
    assert_eq!(check.check().errors.len(), 1);
}

#[test]
fn driver_probe_failure_is_a_single_probe_error() {
    let check = CgroupDriverCheck::new(FakeCgroupDriverProbe::failing());
    let result = check.check();

    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].class, DiagnosticClass::Probe);
    assert_eq!(result.errors[0].code, ids::CODE_CGROUP_DRIVER_PROBE_FAILED);
    assert!(result.errors[0].message.contains("Cannot connect to the Docker daemon"));
}

#[test]
fn driver_probe_failure_survives_ignore_list() {
    let checks: Vec<Box<dyn Check>> = vec![Box::new(CgroupDriverCheck::new(
        FakeCgroupDriverProbe::failing(),
    ))];
    let options = RunOptions {
        ignorable: IgnorableSet::new([ids::CHECK_RUNTIME_CGROUP_DRIVER]),
        cancel: None,
    };

    let report = run_checks(&checks, &options);

    assert_eq!(report.verdict, Verdict::Fail);
    assert_eq!(report.errors.len(), 1);
    assert!(report.warnings.is_empty());
}

#[test]
fn ignored_driver_mismatch_lets_the_run_pass_with_a_warning() {
    let checks: Vec<Box<dyn Check>> = vec![
        Box::new(MemoryCheck::with_probe(mb(1700), FakeMemoryProbe::megabytes(4096))),
        Box::new(CgroupDriverCheck::new(FakeCgroupDriverProbe::driver("cgroupfs"))),
    ];
    let options = RunOptions {
        ignorable: IgnorableSet::new(["runtime.cgroup_driver"]),
        cancel: None,
    };

    let report = run_checks(&checks, &options);

    assert_eq!(report.verdict, Verdict::Warn);
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, ids::CODE_CGROUP_DRIVER_MISMATCH);
}

#[test]
fn registry_follows_enabled_policies_in_order() {
    let cfg = EffectiveConfig {
        profile: "control-plane".to_string(),
        memory: Some(MemoryPolicy {
            minimum_mb: mb(1700),
        }),
        cgroup_driver: Some(CgroupDriverPolicy {
            runtime: "docker".to_string(),
        }),
        ..EffectiveConfig::default()
    };
    let order: Vec<String> = registry(&cfg).iter().map(|c| c.id().to_string()).collect();
    assert_eq!(
        order,
        vec![ids::CHECK_HOST_MEMORY, ids::CHECK_RUNTIME_CGROUP_DRIVER]
    );

    let node = EffectiveConfig {
        memory: None,
        ..cfg
    };
    assert_eq!(registry(&node).len(), 1);
}
