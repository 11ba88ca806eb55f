// crates/suite-logic/src/trace.rs
// ============================================================================
// Module: Requirement Trace Hooks
// Description: Observation hooks invoked during requirement evaluation.
// Purpose: Let callers record which conditions were consulted and their results.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Trace hooks observe leaf evaluations without influencing results. Because
//! evaluation short-circuits, a trace only contains the conditions that were
//! actually consulted.

// ============================================================================
// SECTION: Trace Trait
// ============================================================================

/// Hook invoked whenever a condition is evaluated.
pub trait RequirementTrace<P> {
    /// Called whenever a condition is evaluated
    fn on_condition_evaluated(&mut self, condition: &P, result: bool);
}

/// No-op trace hook for fast paths
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl<P> RequirementTrace<P> for NoopTrace {
    fn on_condition_evaluated(&mut self, _condition: &P, _result: bool) {}
}
