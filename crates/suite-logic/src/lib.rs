// crates/suite-logic/src/lib.rs
// ============================================================================
// Module: Suite Logic Root
// Description: Public API surface for the requirement algebra.
// Purpose: Wire together requirement trees, condition traits, and trace hooks.
// Dependencies: crate::{requirement, trace, traits}
// ============================================================================

//! ## Overview
//! `suite-logic` provides a small Boolean algebra (`And`, `Or`, `Not`) over
//! domain-specific conditions. Suite predicates use it to compose tag checks
//! over test names; the algebra itself knows nothing about tests or tags.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod requirement;
pub mod trace;
pub mod traits;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use requirement::Requirement;
pub use trace::NoopTrace;
pub use trace::RequirementTrace;
pub use traits::ConditionEval;
