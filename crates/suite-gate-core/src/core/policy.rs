// crates/suite-gate-core/src/core/policy.rs
// ============================================================================
// Module: Suite Gate Execution Policy
// Description: Declared per-suite execution policy and its resolution.
// Purpose: Project suite declarations onto a fully specified execution policy.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`SuitePolicy`] is what a suite declares; unset fields defer to
//! [`PolicyDefaults`]. [`SuitePolicy::resolve`] is a pure projection into an
//! [`EffectivePolicy`] handed to the execution engine. Parallelism and flake
//! tolerance are data here: the engine enforces them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default parallelism when a suite declares none (serial execution).
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default per-test timeout when a suite declares none.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Default repetition count when a suite declares none.
pub const DEFAULT_REPETITION_COUNT: u32 = 1;

// ============================================================================
// SECTION: Invariant Check Selection
// ============================================================================

/// Post-run system-event invariant variant applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantCheck {
    /// Strict invariants for suites that must leave the cluster undisturbed.
    Stable,
    /// Relaxed invariants for suites that disrupt the cluster on purpose.
    Permissive,
}

// ============================================================================
// SECTION: Suite Policy
// ============================================================================

/// Execution policy declared by a suite.
///
/// # Invariants
/// - `None` (and zero for counts) means "use the system default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuitePolicy {
    /// Upper bound on concurrently running tests.
    pub parallelism: Option<u32>,
    /// Flaky tests tolerated before the suite fails.
    pub max_allowed_flakes: u32,
    /// Per-test timeout.
    pub test_timeout: Option<Duration>,
    /// Number of times each test is run.
    pub repetition_count: Option<u32>,
    /// Post-run invariant check variant.
    pub invariant_check: Option<InvariantCheck>,
}

impl SuitePolicy {
    /// Creates a policy with every field deferred to defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parallelism: None,
            max_allowed_flakes: 0,
            test_timeout: None,
            repetition_count: None,
            invariant_check: None,
        }
    }

    /// Sets the parallelism bound.
    #[must_use]
    pub const fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = Some(parallelism);
        self
    }

    /// Sets the tolerated flake count.
    #[must_use]
    pub const fn with_max_allowed_flakes(mut self, flakes: u32) -> Self {
        self.max_allowed_flakes = flakes;
        self
    }

    /// Sets the per-test timeout.
    #[must_use]
    pub const fn with_test_timeout(mut self, timeout: Duration) -> Self {
        self.test_timeout = Some(timeout);
        self
    }

    /// Sets the repetition count.
    #[must_use]
    pub const fn with_repetition_count(mut self, count: u32) -> Self {
        self.repetition_count = Some(count);
        self
    }

    /// Selects the post-run invariant check.
    #[must_use]
    pub const fn with_invariant_check(mut self, check: InvariantCheck) -> Self {
        self.invariant_check = Some(check);
        self
    }

    /// Resolves the declared policy against system defaults.
    #[must_use]
    pub fn resolve(&self, defaults: &PolicyDefaults) -> EffectivePolicy {
        EffectivePolicy {
            parallelism: self
                .parallelism
                .filter(|value| *value > 0)
                .unwrap_or(defaults.parallelism),
            max_allowed_flakes: self.max_allowed_flakes,
            test_timeout: self
                .test_timeout
                .filter(|value| !value.is_zero())
                .unwrap_or(defaults.test_timeout),
            repetition_count: self
                .repetition_count
                .filter(|value| *value > 0)
                .unwrap_or(defaults.repetition_count),
            invariant_check: self.invariant_check,
        }
    }
}

/// System-wide fallbacks for unset policy fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDefaults {
    /// Parallelism used when a suite declares none.
    pub parallelism: u32,
    /// Per-test timeout used when a suite declares none.
    pub test_timeout: Duration,
    /// Repetition count used when a suite declares none.
    pub repetition_count: u32,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
            test_timeout: DEFAULT_TEST_TIMEOUT,
            repetition_count: DEFAULT_REPETITION_COUNT,
        }
    }
}

// ============================================================================
// SECTION: Effective Policy
// ============================================================================

/// Fully resolved execution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePolicy {
    /// Upper bound on concurrently running tests.
    pub parallelism: u32,
    /// Flaky tests tolerated before the suite fails.
    pub max_allowed_flakes: u32,
    /// Per-test timeout.
    pub test_timeout: Duration,
    /// Number of times each test is run.
    pub repetition_count: u32,
    /// Post-run invariant check variant, if any.
    pub invariant_check: Option<InvariantCheck>,
}

impl EffectivePolicy {
    /// Returns true when the observed flaky count exceeds the tolerance.
    #[must_use]
    pub fn flake_budget_exceeded(&self, flaky: usize) -> bool {
        u64::try_from(flaky).map_or(true, |flaky| flaky > u64::from(self.max_allowed_flakes))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
