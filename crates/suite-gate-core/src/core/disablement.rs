// crates/suite-gate-core/src/core/disablement.rs
// ============================================================================
// Module: Suite Gate Disablement
// Description: Explicit and time-gated disablement of tests by name.
// Purpose: Decide from a test name alone whether the test must not run.
// Dependencies: regex, time, crate::core::tags
// ============================================================================

//! ## Overview
//! A test is disabled when its name contains `[Disabled` or when it carries a
//! skip-until tag whose date has not been reached:
//!
//! ```text
//! [SkippedUntil:05092022:blocker-bz/123456]
//! ```
//!
//! The date is `MMDDYYYY` and a blocker id is mandatory. Malformed tags fail
//! open: the test runs.
//!
//! Results are NOT stable across the skip date boundary. [`is_disabled`]
//! reads the wall clock on every call, so the same name can flip from
//! disabled to enabled between two evaluations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use regex::Regex;
use time::Date;
use time::Month;
use time::OffsetDateTime;

use crate::core::tags::DISABLED_TAG_PREFIX;

// ============================================================================
// SECTION: Tag Pattern
// ============================================================================

/// Skip-until tag pattern; ASCII digits only.
const SKIPPED_UNTIL_PATTERN: &str = r"\[SkippedUntil:([0-9]{8}):blocker-bz/([a-zA-Z0-9]+)\]";

/// Compiled skip-until pattern; `None` only on a programmer error in the
/// pattern literal, which unit tests rule out.
static SKIPPED_UNTIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(SKIPPED_UNTIL_PATTERN).ok());

// ============================================================================
// SECTION: Skip-Until Tag
// ============================================================================

/// Parsed `[SkippedUntil:MMDDYYYY:blocker-bz/ID]` tag.
///
/// # Invariants
/// - `blocker_id` is non-empty ASCII alphanumeric.
/// - Computed on demand; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipUntilTag {
    /// Calendar date the skip expires on (midnight UTC).
    pub date: Date,
    /// Tracking identifier of the blocking defect.
    pub blocker_id: String,
}

impl SkipUntilTag {
    /// Extracts the first well-formed skip-until tag from a test name.
    ///
    /// Returns `None` when no tag matches or the date is not a real calendar
    /// date.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let pattern = SKIPPED_UNTIL.as_ref()?;
        let captures = pattern.captures(name)?;
        let date = parse_month_day_year(captures.get(1)?.as_str())?;
        let blocker_id = captures.get(2)?.as_str().to_string();
        Some(Self {
            date,
            blocker_id,
        })
    }

    /// Returns the instant the skip expires (midnight UTC of `date`).
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        self.date.midnight().assume_utc()
    }

    /// Returns true when the test is still skipped at `now`.
    ///
    /// The expiry instant itself is no longer skipped.
    #[must_use]
    pub fn skips_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at() > now
    }
}

// ============================================================================
// SECTION: Disablement Evaluation
// ============================================================================

/// Returns true when the test must not run, evaluated at the wall clock.
///
/// The clock is read at most once per call and only when the name carries no
/// explicit disable tag.
#[must_use]
pub fn is_disabled(name: &str) -> bool {
    if is_explicitly_disabled(name) {
        return true;
    }
    should_skip_until(name, OffsetDateTime::now_utc())
}

/// Returns true when the test must not run at the supplied instant.
#[must_use]
pub fn is_disabled_at(name: &str, now: OffsetDateTime) -> bool {
    is_explicitly_disabled(name) || should_skip_until(name, now)
}

/// Returns true when the name carries an explicit disable tag.
#[must_use]
pub fn is_explicitly_disabled(name: &str) -> bool {
    name.contains(DISABLED_TAG_PREFIX)
}

/// Returns true when a well-formed skip-until tag has not yet expired.
fn should_skip_until(name: &str, now: OffsetDateTime) -> bool {
    SkipUntilTag::parse(name).is_some_and(|tag| tag.skips_at(now))
}

/// Parses an eight-digit `MMDDYYYY` string into a calendar date.
fn parse_month_day_year(value: &str) -> Option<Date> {
    if value.len() != 8 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let month: u8 = value.get(0 .. 2)?.parse().ok()?;
    let day: u8 = value.get(2 .. 4)?.parse().ok()?;
    let year: i32 = value.get(4 .. 8)?.parse().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
