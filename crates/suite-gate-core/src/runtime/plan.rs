// crates/suite-gate-core/src/runtime/plan.rs
// ============================================================================
// Module: Suite Gate Dispatch Plan
// Description: Selected tests and resolved policy handed to the engine.
// Purpose: Expose the run's selection and per-test setup to the execution engine.
// Dependencies: thiserror, crate::{core, runtime::hooks}
// ============================================================================

//! ## Overview
//! A [`DispatchPlan`] is the only thing the execution engine sees. The engine
//! calls [`DispatchPlan::prepare_test`] before each test body; a setup
//! failure fails that test alone.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::core::EffectivePolicy;
use crate::core::SuiteName;
use crate::runtime::hooks::PreTestHook;

// ============================================================================
// SECTION: Dispatch Plan
// ============================================================================

/// Per-test setup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test setup failed for {test}: {reason}")]
pub struct TestFailure {
    /// Test whose setup failed.
    pub test: String,
    /// Failure description.
    pub reason: String,
}

/// Tests selected for one suite run plus their execution policy.
pub struct DispatchPlan {
    /// Suite being run.
    pub suite_name: SuiteName,
    /// Selected tests in universe order.
    pub tests: Vec<String>,
    /// Resolved execution policy.
    pub policy: EffectivePolicy,
    /// Per-test setup hook.
    pre_test: Option<Arc<dyn PreTestHook>>,
}

impl DispatchPlan {
    /// Creates a plan.
    #[must_use]
    pub fn new(
        suite_name: SuiteName,
        tests: Vec<String>,
        policy: EffectivePolicy,
        pre_test: Option<Arc<dyn PreTestHook>>,
    ) -> Self {
        Self {
            suite_name,
            tests,
            policy,
            pre_test,
        }
    }

    /// Runs the per-test setup hook for `test`, if the suite declares one.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure`] when the hook fails.
    pub fn prepare_test(&self, test: &str) -> Result<(), TestFailure> {
        let Some(hook) = &self.pre_test else {
            return Ok(());
        };
        hook.run().map_err(|err| TestFailure {
            test: test.to_string(),
            reason: err.to_string(),
        })
    }
}

impl fmt::Debug for DispatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchPlan")
            .field("suite_name", &self.suite_name)
            .field("tests", &self.tests)
            .field("policy", &self.policy)
            .field("pre_test", &self.pre_test.as_ref().map(|hook| hook.name()))
            .finish()
    }
}
