// crates/suite-gate-core/tests/registry.rs
// ============================================================================
// Module: Suite Registry Tests
// Description: Registry construction invariants and lookup.
// ============================================================================
//! ## Overview
//! Ensures the registry fails closed on invalid declarations and reports
//! unknown suites with the list of valid names.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use suite_gate_core::Carveout;
use suite_gate_core::RegistryError;
use suite_gate_core::Suite;
use suite_gate_core::SuiteName;
use suite_gate_core::SuitePredicate;
use suite_gate_core::SuiteRegistry;
use suite_gate_core::TagCondition;
use suite_logic::Requirement;

fn any_suite(name: &str) -> Suite {
    Suite::new(name, "test suite", SuitePredicate::new(Requirement::condition(TagCondition::Any)))
}

#[test]
fn duplicate_names_are_rejected() {
    let result = SuiteRegistry::new([any_suite("a"), any_suite("b"), any_suite("a")]);
    assert_eq!(result.unwrap_err(), RegistryError::DuplicateSuite(SuiteName::new("a")));
}

#[test]
fn empty_names_are_rejected() {
    let result = SuiteRegistry::new([any_suite("")]);
    assert_eq!(result.unwrap_err(), RegistryError::EmptySuiteName);
}

#[test]
fn carve_outs_require_tracking_reference() {
    let predicate = SuitePredicate::new(Requirement::condition(TagCondition::Any))
        .with_carveout(Carveout::new("flaky thing", "  "));
    let result = SuiteRegistry::new([Suite::new("x", "", predicate)]);
    assert_eq!(result.unwrap_err(), RegistryError::UntrackedCarveout {
        suite: SuiteName::new("x"),
        pattern: "flaky thing".to_string(),
    });
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let registry = SuiteRegistry::new([any_suite("openshift/build")]).unwrap();
    assert!(registry.lookup("openshift/build").is_some());
    assert!(registry.lookup("openshift/Build").is_none());
    assert!(registry.lookup("openshift/build/").is_none());
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn unknown_suite_lists_known_names() {
    let registry = SuiteRegistry::new([any_suite("a"), any_suite("b")]).unwrap();
    let err = registry.require("c").unwrap_err();
    assert_eq!(err.to_string(), "unknown suite c; known suites: a, b");
}

#[test]
fn empty_registry_is_allowed() {
    let registry = SuiteRegistry::new(Vec::new()).unwrap();
    assert!(registry.is_empty());
    assert!(registry.require("all").is_err());
}
