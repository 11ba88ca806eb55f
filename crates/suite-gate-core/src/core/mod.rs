// crates/suite-gate-core/src/core/mod.rs
// ============================================================================
// Module: Suite Gate Core Types
// Description: Tag grammar, disablement, predicates, and execution policy.
// Purpose: Provide the pure, side-effect-free building blocks of suite selection.
// Dependencies: suite-logic, regex, serde, time
// ============================================================================

//! ## Overview
//! Core types decide suite membership and execution policy from test names
//! alone. Nothing here performs I/O; only the disablement evaluator may read
//! the wall clock, and every clock-reading function has an `_at` variant that
//! takes an explicit instant.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod allow_list;
pub mod clock;
pub mod disablement;
pub mod identifiers;
pub mod policy;
pub mod predicate;
pub mod tags;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use allow_list::AllowList;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use disablement::SkipUntilTag;
pub use disablement::is_disabled;
pub use disablement::is_disabled_at;
pub use disablement::is_explicitly_disabled;
pub use identifiers::SuiteName;
pub use policy::EffectivePolicy;
pub use policy::InvariantCheck;
pub use policy::PolicyDefaults;
pub use policy::SuitePolicy;
pub use predicate::Carveout;
pub use predicate::MatchDecision;
pub use predicate::MatchExplanation;
pub use predicate::SuitePredicate;
pub use predicate::TagCondition;
pub use tags::is_standard_early_or_late_test;
pub use tags::is_standard_early_test;
