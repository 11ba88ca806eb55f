// crates/suite-logic/src/requirement.rs
// ============================================================================
// Module: Requirement Core Types
// Description: Boolean algebra over typed conditions.
// Purpose: Define `Requirement` along with evaluation and constructor helpers.
// Dependencies: smallvec::SmallVec, crate::{trace, traits}
// ============================================================================

//! ## Overview
//! This module defines the requirement tree and its short-circuit evaluation.
//! The logical operators are domain-agnostic; the `Condition` variant is the
//! boundary where domain semantics are injected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use smallvec::SmallVec;

use crate::trace::NoopTrace;
use crate::trace::RequirementTrace;
use crate::traits::ConditionEval;

// ============================================================================
// SECTION: Requirement Definition
// ============================================================================

/// Requirement tree with domain-specific leaves
///
/// The logical operators (And, Or, Not) are universal while the `Condition`
/// variant carries the domain-specific check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement<P> {
    /// Logical AND: All sub-requirements must be satisfied
    ///
    /// Evaluation short-circuits on the first failure. Empty And is
    /// trivially satisfied.
    And(SmallVec<[Box<Self>; 4]>),

    /// Logical OR: At least one sub-requirement must be satisfied
    ///
    /// Evaluation short-circuits on the first success. Empty Or is
    /// trivially unsatisfiable.
    Or(SmallVec<[Box<Self>; 4]>),

    /// Logical NOT: Inverts the result of the sub-requirement
    Not(Box<Self>),

    /// Domain-specific atomic condition
    Condition(P),
}

// ============================================================================
// SECTION: Execution Helpers
// ============================================================================

impl<P> Requirement<P> {
    /// Evaluates this requirement with short-circuiting.
    pub fn eval(&self, subject: &P::Subject) -> bool
    where
        P: ConditionEval,
    {
        let mut trace = NoopTrace;
        self.eval_with_trace(subject, &mut trace)
    }

    /// Evaluates this requirement and reports every consulted condition.
    pub fn eval_with_trace<T>(&self, subject: &P::Subject, trace: &mut T) -> bool
    where
        P: ConditionEval,
        T: RequirementTrace<P>,
    {
        match self {
            Self::Condition(condition) => {
                let result = condition.eval(subject);
                trace.on_condition_evaluated(condition, result);
                result
            }
            Self::Not(requirement) => !requirement.eval_with_trace(subject, trace),
            Self::And(requirements) => {
                for req in requirements {
                    if !req.eval_with_trace(subject, trace) {
                        return false;
                    }
                }
                true
            }
            Self::Or(requirements) => {
                for req in requirements {
                    if req.eval_with_trace(subject, trace) {
                        return true;
                    }
                }
                false
            }
        }
    }
}

// ============================================================================
// SECTION: Constructor Helpers
// ============================================================================

impl<P> Requirement<P> {
    /// Creates a logical AND of the given requirements
    #[must_use]
    pub fn and(requirements: Vec<Self>) -> Self {
        Self::And(requirements.into_iter().map(Box::new).collect())
    }

    /// Creates a logical OR of the given requirements
    #[must_use]
    pub fn or(requirements: Vec<Self>) -> Self {
        Self::Or(requirements.into_iter().map(Box::new).collect())
    }

    /// Creates a requirement from a condition
    #[must_use]
    pub const fn condition(condition: P) -> Self {
        Self::Condition(condition)
    }
}

impl<P> std::ops::Not for Requirement<P> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

