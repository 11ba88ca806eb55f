// crates/suite-gate-core/src/runtime/runner.rs
// ============================================================================
// Module: Suite Gate Runner
// Description: Lifecycle state machine for a single suite execution.
// Purpose: Run hooks, select tests, dispatch the plan, and judge the outcome.
// Dependencies: serde, thiserror, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`SuiteRunner::run`] drives one suite through its lifecycle:
//!
//! `Created -> PreSuiteRunning -> (PreSuiteFailed | Filtering) -> Dispatched
//! -> Completed -> PostSuiteRunning -> Done`
//!
//! Invariants:
//! - `PreSuite` runs once; on failure nothing is selected or dispatched.
//! - The evaluation instant is sampled once, at `Filtering`, so membership is
//!   stable for the whole run.
//! - `PostSuite` runs once after dispatch, whatever the engine reported; its
//!   failure is recorded and never fails the suite.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::Clock;
use crate::core::EffectivePolicy;
use crate::core::PolicyDefaults;
use crate::core::SuiteName;
use crate::core::SystemClock;
use crate::interfaces::EngineError;
use crate::interfaces::ExecutionEngine;
use crate::interfaces::ExecutionSummary;
use crate::runtime::audit::AuditOutcome;
use crate::runtime::audit::SuiteAuditEvent;
use crate::runtime::audit::SuiteAuditEventParams;
use crate::runtime::audit::SuiteAuditSink;
use crate::runtime::audit::SuiteNoopAuditSink;
use crate::runtime::hooks::HookError;
use crate::runtime::options::RunOptions;
use crate::runtime::plan::DispatchPlan;
use crate::runtime::registry::RegistryError;
use crate::runtime::registry::SuiteRegistry;
use crate::runtime::suite::Suite;

// ============================================================================
// SECTION: Lifecycle Phases
// ============================================================================

/// Lifecycle phase of a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Run accepted for a registered suite.
    Created,
    /// `PreSuite` hook running (or skipped when none is declared).
    PreSuiteRunning,
    /// `PreSuite` hook failed; terminal.
    PreSuiteFailed,
    /// Tests selected from the universe.
    Filtering,
    /// Plan handed to the execution engine.
    Dispatched,
    /// Engine returned.
    Completed,
    /// `PostSuite` hook running (or skipped when none is declared).
    PostSuiteRunning,
    /// Run finished.
    Done,
}

// ============================================================================
// SECTION: Verdict and Report
// ============================================================================

/// Pass/fail judgement for a completed suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuiteVerdict {
    /// No failures and flakes within tolerance.
    Passed,
    /// At least one test failed.
    TestsFailed {
        /// Number of failed tests.
        failed: usize,
    },
    /// Flaky tests exceeded the tolerance.
    FlakeBudgetExceeded {
        /// Observed flaky tests.
        flaky: usize,
        /// Tolerated flaky tests.
        allowed: u32,
    },
}

impl SuiteVerdict {
    /// Judges engine results against the resolved policy.
    #[must_use]
    pub fn from_summary(summary: &ExecutionSummary, policy: &EffectivePolicy) -> Self {
        if !summary.failed.is_empty() {
            return Self::TestsFailed {
                failed: summary.failed.len(),
            };
        }
        if policy.flake_budget_exceeded(summary.flaky.len()) {
            return Self::FlakeBudgetExceeded {
                flaky: summary.flaky.len(),
                allowed: policy.max_allowed_flakes,
            };
        }
        Self::Passed
    }

    /// Returns true for [`SuiteVerdict::Passed`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl fmt::Display for SuiteVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::TestsFailed {
                failed,
            } => write!(f, "{failed} test(s) failed"),
            Self::FlakeBudgetExceeded {
                flaky,
                allowed,
            } => write!(f, "{flaky} flaky test(s) exceed the tolerance of {allowed}"),
        }
    }
}

/// Result of a suite run that reached the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteRunReport {
    /// Suite that ran.
    pub suite: SuiteName,
    /// Resolved execution policy.
    pub policy: EffectivePolicy,
    /// Tests dispatched to the engine.
    pub tests: Vec<String>,
    /// Engine outcomes.
    pub summary: ExecutionSummary,
    /// Pass/fail judgement.
    pub verdict: SuiteVerdict,
    /// `PostSuite` failure, recorded but not propagated.
    pub post_suite_error: Option<String>,
    /// Phases entered, in order.
    pub phases: Vec<RunPhase>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite run errors.
#[derive(Debug, Error)]
pub enum SuiteRunError {
    /// Requested suite is not registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// `PreSuite` hook failed; nothing was dispatched.
    #[error("pre-suite hook {hook} failed for suite {suite}: {source}")]
    PreSuite {
        /// Suite being run.
        suite: SuiteName,
        /// Failing hook label.
        hook: &'static str,
        /// Hook failure.
        source: HookError,
    },
    /// Execution engine failed; `PostSuite` still ran.
    #[error("execution engine failed for suite {suite}: {source}")]
    Engine {
        /// Suite being run.
        suite: SuiteName,
        /// Engine failure.
        source: EngineError,
    },
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runner configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuiteRunnerConfig {
    /// Fallbacks for unset suite policy fields.
    pub defaults: PolicyDefaults,
}

/// Drives suites from a registry through their lifecycle.
pub struct SuiteRunner<E> {
    /// Registered suites.
    registry: Arc<SuiteRegistry>,
    /// Execution engine.
    engine: E,
    /// Time source for disablement evaluation.
    clock: Arc<dyn Clock>,
    /// Lifecycle audit sink.
    audit: Arc<dyn SuiteAuditSink>,
    /// Runner configuration.
    config: SuiteRunnerConfig,
}

impl<E: ExecutionEngine> SuiteRunner<E> {
    /// Creates a runner using the system clock and no audit logging.
    #[must_use]
    pub fn new(registry: Arc<SuiteRegistry>, engine: E, config: SuiteRunnerConfig) -> Self {
        Self {
            registry,
            engine,
            clock: Arc::new(SystemClock),
            audit: Arc::new(SuiteNoopAuditSink),
            config,
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn SuiteAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &SuiteRegistry {
        &self.registry
    }

    /// Runs the named suite over `universe`.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteRunError::Registry`] for unregistered names,
    /// [`SuiteRunError::PreSuite`] when setup fails, and
    /// [`SuiteRunError::Engine`] when the engine fails after `PostSuite` ran.
    pub fn run(
        &self,
        suite_name: &str,
        universe: &[String],
        options: &mut RunOptions,
    ) -> Result<SuiteRunReport, SuiteRunError> {
        let suite = self.registry.require(suite_name)?;
        let mut phases = vec![RunPhase::Created];
        self.emit(suite, RunPhase::Created, AuditOutcome::Ok, None, None, None);

        phases.push(RunPhase::PreSuiteRunning);
        if let Some(hook) = suite.pre_suite() {
            if let Err(source) = hook.run(options) {
                self.emit(
                    suite,
                    RunPhase::PreSuiteFailed,
                    AuditOutcome::Error,
                    Some(hook.name()),
                    None,
                    Some(source.to_string()),
                );
                return Err(SuiteRunError::PreSuite {
                    suite: suite.name().clone(),
                    hook: hook.name(),
                    source,
                });
            }
            self.emit(suite, RunPhase::PreSuiteRunning, AuditOutcome::Ok, Some(hook.name()), None, None);
        }

        phases.push(RunPhase::Filtering);
        let now = self.clock.now();
        let tests: Vec<String> = suite
            .filter_at(universe, now)
            .into_iter()
            .filter(|name| options.narrows(name))
            .map(str::to_string)
            .collect();
        self.emit(suite, RunPhase::Filtering, AuditOutcome::Ok, None, Some(tests.len()), None);

        phases.push(RunPhase::Dispatched);
        let plan = DispatchPlan::new(
            suite.name().clone(),
            tests,
            suite.resolve_policy(&self.config.defaults),
            suite.pre_test().cloned(),
        );
        let outcome = self.engine.execute(&plan);
        phases.push(RunPhase::Completed);
        match &outcome {
            Ok(summary) => self.emit(
                suite,
                RunPhase::Completed,
                AuditOutcome::Ok,
                None,
                Some(summary.total()),
                None,
            ),
            Err(err) => self.emit(
                suite,
                RunPhase::Completed,
                AuditOutcome::Error,
                None,
                None,
                Some(err.to_string()),
            ),
        }

        phases.push(RunPhase::PostSuiteRunning);
        let post_suite_error = self.run_post_suite(suite, options);
        phases.push(RunPhase::Done);

        let summary = outcome.map_err(|source| SuiteRunError::Engine {
            suite: suite.name().clone(),
            source,
        })?;
        let verdict = SuiteVerdict::from_summary(&summary, &plan.policy);
        let message = (!verdict.is_success()).then(|| verdict.to_string());
        self.emit(
            suite,
            RunPhase::Done,
            if verdict.is_success() { AuditOutcome::Ok } else { AuditOutcome::Error },
            None,
            Some(plan.tests.len()),
            message,
        );
        Ok(SuiteRunReport {
            suite: plan.suite_name,
            policy: plan.policy,
            tests: plan.tests,
            summary,
            verdict,
            post_suite_error,
            phases,
        })
    }

    /// Runs the `PostSuite` hook and returns its failure message, if any.
    fn run_post_suite(&self, suite: &Suite, options: &mut RunOptions) -> Option<String> {
        let hook = suite.post_suite()?;
        match hook.run(options) {
            Ok(()) => {
                self.emit(suite, RunPhase::PostSuiteRunning, AuditOutcome::Ok, Some(hook.name()), None, None);
                None
            }
            Err(err) => {
                let message = err.to_string();
                self.emit(
                    suite,
                    RunPhase::PostSuiteRunning,
                    AuditOutcome::Error,
                    Some(hook.name()),
                    None,
                    Some(message.clone()),
                );
                Some(message)
            }
        }
    }

    /// Records a lifecycle audit event.
    fn emit(
        &self,
        suite: &Suite,
        phase: RunPhase,
        outcome: AuditOutcome,
        hook: Option<&'static str>,
        test_count: Option<usize>,
        message: Option<String>,
    ) {
        self.audit.record(&SuiteAuditEvent::new(SuiteAuditEventParams {
            suite: suite.name().to_string(),
            phase,
            outcome,
            hook,
            test_count,
            message,
        }));
    }
}
