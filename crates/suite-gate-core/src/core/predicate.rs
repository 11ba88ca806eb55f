// crates/suite-gate-core/src/core/predicate.rs
// ============================================================================
// Module: Suite Gate Predicates
// Description: Suite membership predicates over test names.
// Purpose: Compose tag checks, defect carve-outs, and disablement into one gate.
// Dependencies: suite-logic, time, crate::core::{allow_list, disablement, tags}
// ============================================================================

//! ## Overview
//! A [`SuitePredicate`] decides whether a test name belongs to a suite. It is
//! evaluated in a fixed order:
//!
//! 1. Disabled names (explicit or time-gated) never match, for every suite.
//! 2. Carve-outs exclude names tied to known defects; each carries its
//!    tracking reference verbatim.
//! 3. The requirement tree of [`TagCondition`] leaves decides the rest.
//!
//! Predicates hold only immutable data, so membership is reproducible for a
//! fixed name and instant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use suite_logic::ConditionEval;
use suite_logic::Requirement;
use suite_logic::RequirementTrace;
use time::OffsetDateTime;

use crate::core::allow_list::AllowList;
use crate::core::disablement::is_disabled_at;
use crate::core::disablement::is_explicitly_disabled;
use crate::core::tags::is_standard_early_or_late_test;
use crate::core::tags::is_standard_early_test;

// ============================================================================
// SECTION: Tag Conditions
// ============================================================================

/// Leaf condition over a test name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagCondition {
    /// Name contains the substring verbatim (case-sensitive).
    Contains(String),
    /// Standard `[Early]`/`[Late]` test of the parallel conformance suite.
    StandardEarlyOrLate,
    /// Standard `[Early]` test of the parallel conformance suite.
    StandardEarly,
    /// Name is listed in the allow-list.
    AllowListed(Arc<AllowList>),
    /// Matches every name.
    Any,
}

impl TagCondition {
    /// Creates a substring condition.
    #[must_use]
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    /// Returns a stable diagnostic label.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Contains(needle) => format!("contains {needle}"),
            Self::StandardEarlyOrLate => "standard early/late test".to_string(),
            Self::StandardEarly => "standard early test".to_string(),
            Self::AllowListed(list) => format!("listed in {}", list.name()),
            Self::Any => "any".to_string(),
        }
    }
}

impl ConditionEval for TagCondition {
    type Subject = str;

    fn eval(&self, name: &str) -> bool {
        match self {
            Self::Contains(needle) => name.contains(needle.as_str()),
            Self::StandardEarlyOrLate => is_standard_early_or_late_test(name),
            Self::StandardEarly => is_standard_early_test(name),
            Self::AllowListed(list) => list.contains(name),
            Self::Any => true,
        }
    }
}

// ============================================================================
// SECTION: Carve-Outs
// ============================================================================

/// Exclusion of a known-broken test by name substring.
///
/// # Invariants
/// - `tracking` names the defect that justifies the exclusion; the registry
///   rejects carve-outs without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carveout {
    /// Substring that identifies the excluded tests.
    pattern: String,
    /// Tracking reference for the defect, reproduced verbatim.
    tracking: String,
}

impl Carveout {
    /// Creates a carve-out for names containing `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, tracking: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tracking: tracking.into(),
        }
    }

    /// Returns the excluded substring.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the defect tracking reference.
    #[must_use]
    pub fn tracking(&self) -> &str {
        &self.tracking
    }

    /// Returns true when the carve-out excludes the name.
    #[must_use]
    pub fn excludes(&self, name: &str) -> bool {
        name.contains(self.pattern.as_str())
    }
}

// ============================================================================
// SECTION: Suite Predicate
// ============================================================================

/// Membership predicate for one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitePredicate {
    /// Tag requirement evaluated after disablement and carve-outs.
    requirement: Requirement<TagCondition>,
    /// Known-defect exclusions.
    carveouts: Vec<Carveout>,
}

impl SuitePredicate {
    /// Creates a predicate from a tag requirement.
    #[must_use]
    pub const fn new(requirement: Requirement<TagCondition>) -> Self {
        Self {
            requirement,
            carveouts: Vec::new(),
        }
    }

    /// Adds a known-defect carve-out.
    #[must_use]
    pub fn with_carveout(mut self, carveout: Carveout) -> Self {
        self.carveouts.push(carveout);
        self
    }

    /// Returns the tag requirement.
    #[must_use]
    pub const fn requirement(&self) -> &Requirement<TagCondition> {
        &self.requirement
    }

    /// Returns the carve-outs in declaration order.
    #[must_use]
    pub fn carveouts(&self) -> &[Carveout] {
        &self.carveouts
    }

    /// Returns true when the name belongs to the suite at the wall clock.
    ///
    /// Results are not stable across a skip-until expiry; use
    /// [`SuitePredicate::matches_at`] to pin the instant.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if is_explicitly_disabled(name) {
            return false;
        }
        self.matches_at(name, OffsetDateTime::now_utc())
    }

    /// Returns true when the name belongs to the suite at `now`.
    #[must_use]
    pub fn matches_at(&self, name: &str, now: OffsetDateTime) -> bool {
        if is_disabled_at(name, now) {
            return false;
        }
        if self.carveouts.iter().any(|carveout| carveout.excludes(name)) {
            return false;
        }
        self.requirement.eval(name)
    }

    /// Explains how the predicate decided for `name` at `now`.
    #[must_use]
    pub fn explain_at(&self, name: &str, now: OffsetDateTime) -> MatchExplanation {
        if is_disabled_at(name, now) {
            return MatchExplanation {
                decision: MatchDecision::Disabled,
                conditions: Vec::new(),
            };
        }
        if let Some(carveout) = self.carveouts.iter().find(|carveout| carveout.excludes(name)) {
            return MatchExplanation {
                decision: MatchDecision::CarvedOut {
                    tracking: carveout.tracking.clone(),
                },
                conditions: Vec::new(),
            };
        }
        let mut trace = ConditionTrace::default();
        let matched = self.requirement.eval_with_trace(name, &mut trace);
        MatchExplanation {
            decision: MatchDecision::Requirement(matched),
            conditions: trace.entries,
        }
    }
}

// ============================================================================
// SECTION: Explanations
// ============================================================================

/// Stage of the predicate that decided the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchDecision {
    /// Excluded by an explicit or active time-gated disable tag.
    Disabled,
    /// Excluded by a known-defect carve-out.
    CarvedOut {
        /// Tracking reference of the carve-out.
        tracking: String,
    },
    /// Decided by the tag requirement.
    Requirement(bool),
}

/// Outcome of a predicate evaluation with the conditions it consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchExplanation {
    /// Deciding stage.
    pub decision: MatchDecision,
    /// Conditions consulted by the requirement, with results, in order.
    pub conditions: Vec<(String, bool)>,
}

/// Trace collector recording condition labels.
#[derive(Default)]
struct ConditionTrace {
    /// Labels and results of consulted conditions.
    entries: Vec<(String, bool)>,
}

impl RequirementTrace<TagCondition> for ConditionTrace {
    fn on_condition_evaluated(&mut self, condition: &TagCondition, result: bool) {
        self.entries.push((condition.label(), result));
    }
}
