// crates/suite-gate-core/src/core/clock.rs
// ============================================================================
// Module: Suite Gate Clock
// Description: Evaluation instants for time-gated disablement.
// Purpose: Let hosts choose between wall-clock and pinned evaluation instants.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Skip-until tags expire on a calendar date, so suite membership depends on
//! when it is evaluated. Runtime components read the instant through a
//! [`Clock`] so tests and replays can pin it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of evaluation instants.
pub trait Clock: Send + Sync {
    /// Returns the current evaluation instant.
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock pinned to a fixed instant.
///
/// # Invariants
/// - Always returns the instant it was constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
