// crates/suite-gate-core/src/lib.rs
// ============================================================================
// Module: Suite Gate Core Library
// Description: Public API surface for the Suite Gate core.
// Purpose: Expose suite predicates, policies, interfaces, and the runner.
// Dependencies: crate::{catalog, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Suite Gate decides which end-to-end tests belong to a named suite, under
//! which execution policy the suite runs, and which lifecycle hooks wrap it.
//! Test discovery and execution stay outside; the runner hands a
//! [`DispatchPlan`] to an [`ExecutionEngine`] and judges the reported results.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use catalog::CuratedLists;
pub use catalog::openshift_suites;
pub use interfaces::EngineError;
pub use interfaces::ExecutionEngine;
pub use interfaces::ExecutionSummary;
pub use interfaces::NameMatcher;
pub use interfaces::ProviderConfig;
pub use interfaces::ProviderError;
pub use interfaces::ProviderRequest;
pub use interfaces::SuiteEnvironment;
pub use runtime::DispatchPlan;
pub use runtime::HookError;
pub use runtime::PostSuiteHook;
pub use runtime::PreSuiteHook;
pub use runtime::PreTestHook;
pub use runtime::RegistryError;
pub use runtime::RunOptions;
pub use runtime::RunPhase;
pub use runtime::Suite;
pub use runtime::SuiteAuditSink;
pub use runtime::SuiteRegistry;
pub use runtime::SuiteRunError;
pub use runtime::SuiteRunReport;
pub use runtime::SuiteRunner;
pub use runtime::SuiteRunnerConfig;
pub use runtime::SuiteVerdict;
