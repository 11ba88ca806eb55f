// crates/suite-gate-core/tests/runner.rs
// ============================================================================
// Module: Suite Runner Lifecycle Tests
// Description: Hook ordering, selection, dispatch, and verdicts.
// ============================================================================
//! ## Overview
//! Drives the lifecycle state machine with recording fakes and checks each
//! transition, including hook failures and engine errors.

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

mod support;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use suite_gate_core::CuratedLists;
use suite_gate_core::HookError;
use suite_gate_core::PostSuiteHook;
use suite_gate_core::PreTestHook;
use suite_gate_core::RegistryError;
use suite_gate_core::RunOptions;
use suite_gate_core::RunPhase;
use suite_gate_core::Suite;
use suite_gate_core::SuiteEnvironment;
use suite_gate_core::SuitePolicy;
use suite_gate_core::SuitePredicate;
use suite_gate_core::SuiteRegistry;
use suite_gate_core::SuiteRunError;
use suite_gate_core::SuiteRunner;
use suite_gate_core::SuiteRunnerConfig;
use suite_gate_core::SuiteVerdict;
use suite_gate_core::TagCondition;
use suite_gate_core::openshift_suites;
use suite_gate_core::runtime::AuditOutcome;
use suite_gate_core::runtime::ProviderFiltered;
use suite_logic::Requirement;
use support::CallLog;
use support::FakeEnvironment;
use support::MemoryAuditSink;
use support::RecordingEngine;
use support::SharedBuffer;
use support::call_log;
use support::calls;
use support::fixed_clock;
use support::universe;
use time::Month;

const PARALLEL_A: &str = "[sig-network] a [Suite:openshift/conformance/parallel]";
const PARALLEL_B: &str = "[sig-node] b [Suite:openshift/conformance/parallel]";
const PARALLEL_AWS_SKIP: &str = "[sig-node] c [Skipped:aws] [Suite:openshift/conformance/parallel]";
const SKIPPED_UNTIL: &str = "[sig-node] d [SkippedUntil:06152024:blocker-bz/9] [Suite:openshift/conformance/parallel]";
const UNRELATED: &str = "[sig-cli] e [Suite:k8s]";

fn catalog_runner(
    environment: FakeEnvironment,
    engine: RecordingEngine,
    day: u8,
) -> (SuiteRunner<RecordingEngine>, Arc<MemoryAuditSink>) {
    let environment: Arc<dyn SuiteEnvironment> = Arc::new(environment);
    let registry = openshift_suites(&CuratedLists::default(), &environment).unwrap();
    let audit = Arc::new(MemoryAuditSink::default());
    let runner = SuiteRunner::new(Arc::new(registry), engine, SuiteRunnerConfig::default())
        .with_clock(fixed_clock(2024, Month::June, day))
        .with_audit_sink(audit.clone());
    (runner, audit)
}

fn all_names() -> Vec<String> {
    universe(&[PARALLEL_A, PARALLEL_B, PARALLEL_AWS_SKIP, SKIPPED_UNTIL, UNRELATED])
}

// ========================================================================
// SECTION: Happy Path
// ========================================================================

#[test]
fn provider_hook_resolves_and_narrows_selection() {
    let log = call_log();
    let (runner, audit) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("aws", true);

    let report = runner.run("openshift/conformance/parallel", &all_names(), &mut options).unwrap();

    assert_eq!(report.tests, universe(&[PARALLEL_A, PARALLEL_B]));
    assert_eq!(report.verdict, SuiteVerdict::Passed);
    assert_eq!(report.policy.parallelism, 30);
    assert_eq!(report.post_suite_error, None);
    assert_eq!(options.provider, r#"{"type":"aws"}"#);
    assert!(options.provider_config().is_some());
    assert_eq!(calls(&log), vec!["decode:aws:dry_run=true:initialize=true", "execute:2"]);
    assert_eq!(report.phases, vec![
        RunPhase::Created,
        RunPhase::PreSuiteRunning,
        RunPhase::Filtering,
        RunPhase::Dispatched,
        RunPhase::Completed,
        RunPhase::PostSuiteRunning,
        RunPhase::Done,
    ]);
    let events = audit.events.lock().unwrap();
    assert_eq!(events.first().map(|event| event.phase), Some(RunPhase::Created));
    assert_eq!(events.last().map(|event| event.phase), Some(RunPhase::Done));
    assert!(events.iter().all(|event| event.outcome == AuditOutcome::Ok));
}

#[test]
fn skip_until_is_evaluated_at_the_injected_clock() {
    let log = call_log();
    let (runner, _) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 15);
    let mut options = RunOptions::new("gcp", false);
    let report = runner.run("openshift/conformance/parallel", &all_names(), &mut options).unwrap();
    assert!(report.tests.contains(&SKIPPED_UNTIL.to_string()));

    let (runner, _) = catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log), 14);
    let mut options = RunOptions::new("gcp", false);
    let report = runner.run("openshift/conformance/parallel", &all_names(), &mut options).unwrap();
    assert!(!report.tests.contains(&SKIPPED_UNTIL.to_string()));
}

#[test]
fn no_provider_hook_forces_none() {
    let log = call_log();
    let (runner, _) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("aws", false);
    let names = universe(&["[Feature:LegacyCommandTests] cmd", "[Feature:LegacyCommandTests] x [Skipped:none]"]);
    let report = runner.run("openshift/test-cmd", &names, &mut options).unwrap();
    assert_eq!(report.tests, universe(&["[Feature:LegacyCommandTests] cmd"]));
    assert_eq!(calls(&log)[0], "decode:none:dry_run=false:initialize=true");
}

#[test]
fn all_suite_initializes_provider_without_narrowing() {
    let log = call_log();
    let (runner, _) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("aws", false);
    let report = runner.run("all", &all_names(), &mut options).unwrap();
    assert!(report.tests.contains(&PARALLEL_AWS_SKIP.to_string()));
    assert!(options.match_fn().is_none());
    assert!(options.provider_config().is_some());
}

#[test]
fn csi_suite_initializes_framework_and_prints_capabilities() {
    let log = call_log();
    let (runner, _) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 1);
    let buffer = SharedBuffer::default();
    let mut options = RunOptions::new("aws", true).with_output(Box::new(buffer.clone()));
    let names = universe(&["External Storage [Driver:csi.x] volumes work"]);
    let report = runner.run("openshift/csi", &names, &mut options).unwrap();
    assert_eq!(report.tests.len(), 1);
    assert_eq!(calls(&log), vec![
        "decode:aws:dry_run=true:initialize=true",
        r#"init_framework:{"type":"aws"}:dry_run=true"#,
        "execute:1",
        "storage_capabilities",
    ]);
    assert_eq!(buffer.contents(), "snapshot: true\n");
}

// ========================================================================
// SECTION: Failures
// ========================================================================

#[test]
fn pre_suite_failure_dispatches_nothing() {
    let log = call_log();
    let mut environment = FakeEnvironment::new(log.clone());
    environment.fail_decode = true;
    let (runner, audit) = catalog_runner(environment, RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("aws", false);

    let err = runner.run("openshift/conformance/parallel", &all_names(), &mut options).unwrap_err();

    match err {
        SuiteRunError::PreSuite {
            hook, ..
        } => assert_eq!(hook, "provider_filtered"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls(&log), vec!["decode:aws:dry_run=false:initialize=true"]);
    let events = audit.events.lock().unwrap();
    assert_eq!(events.last().map(|event| event.phase), Some(RunPhase::PreSuiteFailed));
}

#[test]
fn framework_init_failure_is_a_pre_suite_failure() {
    let log = call_log();
    let mut environment = FakeEnvironment::new(log.clone());
    environment.fail_initialize = true;
    let (runner, _) = catalog_runner(environment, RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("aws", false);
    let result = runner.run("experimental/reliability/minimal", &all_names(), &mut options);
    assert!(matches!(result, Err(SuiteRunError::PreSuite { hook: "kube_framework_init", .. })));
    assert!(!calls(&log).iter().any(|call| call.starts_with("execute")));
}

#[test]
fn unknown_suite_is_rejected_before_any_hook() {
    let log = call_log();
    let (runner, _) =
        catalog_runner(FakeEnvironment::new(log.clone()), RecordingEngine::new(log.clone()), 1);
    let mut options = RunOptions::new("", false);
    let err = runner.run("openshift/conformance/paralel", &all_names(), &mut options).unwrap_err();
    match &err {
        SuiteRunError::Registry(RegistryError::UnknownSuite {
            name,
            known,
        }) => {
            assert_eq!(name, "openshift/conformance/paralel");
            assert!(known.starts_with("openshift/conformance, openshift/conformance/parallel, "));
            assert!(known.ends_with("openshift/nodes/realtime"));
        }
        other => panic!("expected unknown suite, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("unknown suite openshift/conformance/paralel; known suites: "));
    assert!(message.contains("openshift/conformance/parallel"));
    assert!(calls(&log).is_empty());
}

struct FailingPostSuite {
    runs: AtomicUsize,
}

impl PostSuiteHook for FailingPostSuite {
    fn name(&self) -> &'static str {
        "failing_post_suite"
    }

    fn run(&self, _options: &mut RunOptions) -> Result<(), HookError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Err(HookError::Failed("teardown exploded".to_string()))
    }
}

struct CountingPreTest {
    runs: AtomicUsize,
    fail_after: usize,
}

impl PreTestHook for CountingPreTest {
    fn name(&self) -> &'static str {
        "counting_pre_test"
    }

    fn run(&self) -> Result<(), HookError> {
        let seen = self.runs.fetch_add(1, Ordering::SeqCst);
        if seen >= self.fail_after {
            return Err(HookError::Failed("setup failed".to_string()));
        }
        Ok(())
    }
}

fn custom_runner(
    log: &CallLog,
    post_suite: Arc<FailingPostSuite>,
    pre_test: Arc<CountingPreTest>,
    engine: RecordingEngine,
) -> SuiteRunner<RecordingEngine> {
    let environment: Arc<dyn SuiteEnvironment> = Arc::new(FakeEnvironment::new(log.clone()));
    let suite = Suite::new(
        "custom",
        "Custom suite.",
        SuitePredicate::new(Requirement::condition(TagCondition::contains("[sig-node]"))),
    )
    .with_policy(SuitePolicy::new().with_max_allowed_flakes(1))
    .with_pre_suite(Arc::new(ProviderFiltered::new(environment)))
    .with_post_suite(post_suite)
    .with_pre_test(pre_test);
    let registry = SuiteRegistry::new([suite]).unwrap();
    SuiteRunner::new(Arc::new(registry), engine, SuiteRunnerConfig::default())
        .with_clock(fixed_clock(2024, Month::June, 1))
}

#[test]
fn post_suite_failure_is_recorded_not_propagated() {
    let log = call_log();
    let post_suite = Arc::new(FailingPostSuite {
        runs: AtomicUsize::new(0),
    });
    let pre_test = Arc::new(CountingPreTest {
        runs: AtomicUsize::new(0),
        fail_after: usize::MAX,
    });
    let runner =
        custom_runner(&log, post_suite.clone(), pre_test.clone(), RecordingEngine::new(log.clone()));
    let mut options = RunOptions::new("aws", false);

    let report = runner.run("custom", &all_names(), &mut options).unwrap();

    assert_eq!(report.verdict, SuiteVerdict::Passed);
    assert_eq!(report.post_suite_error.as_deref(), Some("hook failed: teardown exploded"));
    assert_eq!(post_suite.runs.load(Ordering::SeqCst), 1);
    assert_eq!(pre_test.runs.load(Ordering::SeqCst), report.tests.len());
}

#[test]
fn pre_test_failure_fails_only_that_test() {
    let log = call_log();
    let post_suite = Arc::new(FailingPostSuite {
        runs: AtomicUsize::new(0),
    });
    let pre_test = Arc::new(CountingPreTest {
        runs: AtomicUsize::new(0),
        fail_after: 1,
    });
    let runner = custom_runner(&log, post_suite, pre_test, RecordingEngine::new(log.clone()));
    let mut options = RunOptions::new("gcp", false);
    let names = universe(&["[sig-node] one", "[sig-node] two", "[sig-cli] three"]);

    let report = runner.run("custom", &names, &mut options).unwrap();

    assert_eq!(report.summary.passed, universe(&["[sig-node] one"]));
    assert_eq!(report.summary.failed, universe(&["[sig-node] two"]));
    assert_eq!(report.verdict, SuiteVerdict::TestsFailed {
        failed: 1
    });
}

#[test]
fn engine_failure_still_runs_post_suite() {
    let log = call_log();
    let post_suite = Arc::new(FailingPostSuite {
        runs: AtomicUsize::new(0),
    });
    let pre_test = Arc::new(CountingPreTest {
        runs: AtomicUsize::new(0),
        fail_after: usize::MAX,
    });
    let mut engine = RecordingEngine::new(log.clone());
    engine.fail_with = Some("ginkgo crashed".to_string());
    let runner = custom_runner(&log, post_suite.clone(), pre_test, engine);
    let mut options = RunOptions::new("aws", false);

    let result = runner.run("custom", &all_names(), &mut options);

    assert!(matches!(result, Err(SuiteRunError::Engine { .. })));
    assert_eq!(post_suite.runs.load(Ordering::SeqCst), 1);
}

// ========================================================================
// SECTION: Flake Budget
// ========================================================================

#[test]
fn sixteen_flakes_exceed_a_budget_of_fifteen() {
    let names: Vec<String> = (0 .. 20)
        .map(|index| format!("[sig-node] t{index} [Suite:openshift/conformance/parallel]"))
        .collect();
    for (flaky, expected) in [
        (15, SuiteVerdict::Passed),
        (16, SuiteVerdict::FlakeBudgetExceeded {
            flaky: 16,
            allowed: 15,
        }),
    ] {
        let log = call_log();
        let mut engine = RecordingEngine::new(log.clone());
        engine.flaky = flaky;
        let (runner, _) = catalog_runner(FakeEnvironment::new(log), engine, 1);
        let mut options = RunOptions::new("aws", false);
        let report = runner.run("openshift/conformance/parallel", &names, &mut options).unwrap();
        assert_eq!(report.verdict, expected);
    }
}
