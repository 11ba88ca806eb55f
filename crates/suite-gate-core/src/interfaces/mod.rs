// crates/suite-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Suite Gate Interfaces
// Description: Contracts for provider resolution, framework setup, and dispatch.
// Purpose: Define the collaborator surfaces the suite runner depends on.
// Dependencies: serde, serde_json, thiserror, crate::runtime::plan
// ============================================================================

//! ## Overview
//! The runner never discovers, configures, or executes tests itself. Provider
//! resolution and framework initialization go through [`SuiteEnvironment`];
//! selected tests go to an [`ExecutionEngine`] as a
//! [`DispatchPlan`](crate::runtime::DispatchPlan). Implementations report
//! failures as typed errors and must not panic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::runtime::plan::DispatchPlan;

// ============================================================================
// SECTION: Name Matching
// ============================================================================

/// Narrowing filter over test names installed by a provider.
pub trait NameMatcher: Send + Sync {
    /// Returns true when the provider accepts the test name.
    fn matches(&self, name: &str) -> bool;
}

impl<F> NameMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

// ============================================================================
// SECTION: Provider Resolution
// ============================================================================

/// Parameters for resolving a provider identifier.
#[derive(Debug, Clone, Copy)]
pub struct ProviderRequest<'a> {
    /// Requested provider identifier (name, JSON document, or empty).
    pub identifier: &'a str,
    /// Dry-run flag; providers must not touch a cluster when set.
    pub dry_run: bool,
    /// Whether the provider should be fully initialized.
    pub initialize: bool,
    /// Optional structured overrides for the decoded configuration.
    pub overrides: Option<&'a Value>,
}

/// Resolved cluster/provider configuration.
pub trait ProviderConfig: Send + Sync {
    /// Returns the filter that restricts tests to this provider.
    fn match_fn(&self) -> Arc<dyn NameMatcher>;

    /// Returns the canonical JSON form of the configuration.
    fn to_json_string(&self) -> String;
}

/// Provider resolution and environment errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider identifier could not be decoded.
    #[error("provider decode error: {0}")]
    Decode(String),
    /// Test framework initialization failed.
    #[error("test framework initialization error: {0}")]
    Initialize(String),
    /// Writing environment output failed.
    #[error("environment output error: {0}")]
    Output(String),
}

/// Environment that resolves providers and prepares the test framework.
pub trait SuiteEnvironment: Send + Sync {
    /// Decodes the requested provider into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Decode`] when the identifier is not usable.
    fn decode_provider(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<Arc<dyn ProviderConfig>, ProviderError>;

    /// Initializes the external test framework for the resolved provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Initialize`] when initialization fails.
    fn initialize_test_framework(
        &self,
        _config: &dyn ProviderConfig,
        _dry_run: bool,
    ) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Writes the storage driver capabilities observed during the run.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Output`] when the capabilities cannot be written.
    fn write_storage_capabilities(&self, _out: &mut dyn Write) -> Result<(), ProviderError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Execution Engine
// ============================================================================

/// Per-test outcomes reported by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Tests that passed on every attempt.
    pub passed: Vec<String>,
    /// Tests that failed.
    pub failed: Vec<String>,
    /// Tests that failed at least once and later passed.
    pub flaky: Vec<String>,
}

impl ExecutionSummary {
    /// Returns the number of tests the engine reported on.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len() + self.flaky.len()
    }
}

/// Execution engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine could not run the plan.
    #[error("execution engine error: {0}")]
    Failed(String),
}

/// Engine that runs the selected tests under the resolved policy.
pub trait ExecutionEngine {
    /// Executes a dispatch plan and reports per-test outcomes.
    ///
    /// Implementations call [`DispatchPlan::prepare_test`] immediately before
    /// each test body and record a setup failure as that test's failure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the plan cannot be executed at all.
    fn execute(&self, plan: &DispatchPlan) -> Result<ExecutionSummary, EngineError>;
}
