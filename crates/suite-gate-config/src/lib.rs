// crates/suite-gate-config/src/lib.rs
// ============================================================================
// Module: Suite Gate Config Library
// Description: Config model, validation, and example payloads.
// Purpose: Single source of truth for suite-gate.toml semantics.
// Dependencies: suite-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `suite-gate-config` loads and validates `suite-gate.toml`, then turns the
//! validated settings into the runtime inputs of `suite-gate-core`: policy
//! defaults, run options, curated allow-lists, and the lifecycle audit sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AllowListsConfig;
pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::ConfigError;
pub use config::DefaultsConfig;
pub use config::RunConfig;
pub use config::SuiteGateConfig;
pub use examples::config_toml_example;
