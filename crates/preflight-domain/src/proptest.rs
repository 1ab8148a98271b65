//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Memory threshold comparison and integer truncation
//! - Cgroup driver matching
//! - Aggregation counts and ordering across checks

use crate::check::Check;
use crate::checks::{CgroupDriverCheck, MemoryCheck};
use crate::engine::run_checks;
use crate::policy::{IgnorableSet, RunOptions};
use crate::test_support::{FakeCgroupDriverProbe, FakeMemoryProbe, StaticCheck, boxed};
use preflight_types::Verdict;
use proptest::prelude::*;
use std::num::NonZeroU64;

// ============================================================================
// Strategies
// ============================================================================

/// One synthetic check: (native warnings, policy errors, probe errors).
fn arb_check_shape() -> impl Strategy<Value = (usize, usize, usize)> {
    (0usize..3, 0usize..3, 0usize..2)
}

fn arb_driver() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("systemd".to_string()),
        Just("cgroupfs".to_string()),
        Just("SYSTEMD".to_string()),
        prop::string::string_regex("[a-z]{1,12}").unwrap(),
    ]
}

fn build(shapes: &[(usize, usize, usize)]) -> Vec<StaticCheck> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, &(w, e, p))| {
            let mut c = StaticCheck::new(&format!("check.{i}"));
            for n in 0..w {
                c = c.warning(&format!("w{i}.{n}"));
            }
            for n in 0..e {
                c = c.error_policy(&format!("e{i}.{n}"));
            }
            for n in 0..p {
                c = c.error_probe(&format!("p{i}.{n}"));
            }
            c
        })
        .collect()
}

proptest! {
    #[test]
    fn memory_errors_iff_actual_below_minimum(minimum in 1u64..1_000_000, actual in 0u64..1_000_000) {
        let check = MemoryCheck::with_probe(
            NonZeroU64::new(minimum).unwrap(),
            FakeMemoryProbe::megabytes(actual),
        );
        let result = check.check();

        prop_assert!(result.warnings.is_empty());
        if actual < minimum {
            prop_assert_eq!(result.errors.len(), 1);
            prop_assert!(result.errors[0].message.contains(&actual.to_string()));
            prop_assert!(result.errors[0].message.contains(&minimum.to_string()));
        } else {
            prop_assert!(result.errors.is_empty());
        }
    }

    #[test]
    fn memory_uses_floor_of_bytes_over_mebibyte(units in 0u64..(1 << 40), unit_size in 1u64..=65536) {
        let expected = (u128::from(units) * u128::from(unit_size) / 1_048_576) as u64;
        // Threshold one above the truncated value must fail; at the value must pass.
        let above = MemoryCheck::with_probe(
            NonZeroU64::new(expected + 1).unwrap(),
            FakeMemoryProbe::units(units, unit_size),
        );
        prop_assert_eq!(above.check().errors.len(), 1);

        if let Some(at) = NonZeroU64::new(expected) {
            let check = MemoryCheck::with_probe(at, FakeMemoryProbe::units(units, unit_size));
            prop_assert!(check.check().is_clean());
        }
    }

    #[test]
    fn cgroup_driver_clean_iff_exactly_systemd(driver in arb_driver()) {
        let check = CgroupDriverCheck::new(FakeCgroupDriverProbe::driver(&driver));
        let result = check.check();

        prop_assert!(result.warnings.is_empty());
        if driver == "systemd" {
            prop_assert!(result.errors.is_empty());
        } else {
            prop_assert_eq!(result.errors.len(), 1);
            prop_assert!(result.errors[0].message.contains(&driver));
        }
    }

    #[test]
    fn aggregation_counts_match_ignore_list(
        shapes in prop::collection::vec(arb_check_shape(), 0..6),
        ignore_mask in prop::collection::vec(any::<bool>(), 6),
    ) {
        let ignored: Vec<String> = (0..shapes.len())
            .filter(|&i| ignore_mask[i])
            .map(|i| format!("check.{i}"))
            .collect();
        let options = RunOptions {
            ignorable: IgnorableSet::new(&ignored),
            cancel: None,
        };

        let report = run_checks(&boxed(build(&shapes)), &options);

        let native_warnings: usize = shapes.iter().map(|s| s.0).sum();
        let downgraded: usize = shapes
            .iter()
            .enumerate()
            .filter(|(i, _)| ignore_mask[*i])
            .map(|(_, s)| s.1)
            .sum();
        let all_errors: usize = shapes.iter().map(|s| s.1 + s.2).sum();

        prop_assert_eq!(report.warnings.len(), native_warnings + downgraded);
        prop_assert_eq!(report.errors.len(), all_errors - downgraded);
        prop_assert_eq!(report.errors_downgraded as usize, downgraded);
        prop_assert_eq!(report.checks_run as usize, shapes.len());
        prop_assert_eq!(report.verdict == Verdict::Fail, !report.errors.is_empty());
    }

    #[test]
    fn native_warnings_keep_registration_order(
        shapes in prop::collection::vec(arb_check_shape(), 1..6),
    ) {
        let report = run_checks(&boxed(build(&shapes)), &RunOptions::default());

        let expected: Vec<String> = shapes
            .iter()
            .enumerate()
            .flat_map(|(i, s)| (0..s.0).map(move |n| format!("w{i}.{n}")))
            .collect();
        let actual: Vec<String> = report.warnings.iter().map(|w| w.message.clone()).collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn warnings_from_first_and_last_check_keep_relative_order() {
    let checks = boxed(vec![
        StaticCheck::new("a").warning("from a"),
        StaticCheck::new("b").error_policy("from b"),
        StaticCheck::new("c").warning("from c"),
    ]);
    let report = run_checks(&checks, &RunOptions::default());

    let messages: Vec<&str> = report.warnings.iter().map(|w| w.message.as_str()).collect();
    assert_eq!(messages, vec!["from a", "from c"]);
}
