// crates/suite-logic/src/traits.rs
// ============================================================================
// Module: Requirement Traits
// Description: Evaluation contract for requirement leaves.
// Purpose: Define how domain conditions evaluate against a subject.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A condition is the leaf of a requirement tree. It evaluates against a
//! borrowed subject (for suites, the test name) and must be pure: the same
//! subject always yields the same answer.

// ============================================================================
// SECTION: Condition Trait
// ============================================================================

/// Core trait for condition evaluation.
///
/// Implementations must not mutate shared state; requirement evaluation may
/// call them any number of times in any order.
pub trait ConditionEval {
    /// Subject the condition inspects (may be unsized, e.g. `str`).
    type Subject: ?Sized;

    /// Returns `true` when the condition holds for the subject.
    fn eval(&self, subject: &Self::Subject) -> bool;
}
