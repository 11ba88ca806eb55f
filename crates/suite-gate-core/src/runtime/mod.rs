// crates/suite-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Suite Gate Runtime
// Description: Suites, registry, lifecycle hooks, and the suite runner.
// Purpose: Orchestrate selection and dispatch of a named suite.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime turns the pure predicates and policies of [`crate::core`] into
//! runnable suites. It owns the registry, the per-run options, lifecycle
//! hooks, the dispatch plan, and the lifecycle audit trail.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod hooks;
pub mod options;
pub mod plan;
pub mod registry;
pub mod runner;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditOutcome;
pub use audit::SuiteAuditEvent;
pub use audit::SuiteAuditEventParams;
pub use audit::SuiteAuditSink;
pub use audit::SuiteFileAuditSink;
pub use audit::SuiteNoopAuditSink;
pub use audit::SuiteStderrAuditSink;
pub use hooks::HookError;
pub use hooks::InitializeProvider;
pub use hooks::KubeFrameworkInit;
pub use hooks::NO_PROVIDER;
pub use hooks::NoProvider;
pub use hooks::PostSuiteHook;
pub use hooks::PreSuiteHook;
pub use hooks::PreTestHook;
pub use hooks::ProviderFiltered;
pub use hooks::StorageCapabilities;
pub use options::RunOptions;
pub use plan::DispatchPlan;
pub use plan::TestFailure;
pub use registry::RegistryError;
pub use registry::SuiteRegistry;
pub use runner::RunPhase;
pub use runner::SuiteRunError;
pub use runner::SuiteRunReport;
pub use runner::SuiteRunner;
pub use runner::SuiteRunnerConfig;
pub use runner::SuiteVerdict;
pub use suite::Suite;
