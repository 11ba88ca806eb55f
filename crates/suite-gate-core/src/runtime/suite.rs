// crates/suite-gate-core/src/runtime/suite.rs
// ============================================================================
// Module: Suite Gate Suite Definition
// Description: Named suite with predicate, policy, and lifecycle hooks.
// Purpose: Bundle everything the runner needs to select and run one suite.
// Dependencies: time, crate::{core, runtime::hooks}
// ============================================================================

//! ## Overview
//! A [`Suite`] is declared once at startup and never mutated. Descriptions
//! are normalized on construction: each line is trimmed and surrounding
//! blank lines are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use time::OffsetDateTime;

use crate::core::EffectivePolicy;
use crate::core::PolicyDefaults;
use crate::core::SuiteName;
use crate::core::SuitePolicy;
use crate::core::SuitePredicate;
use crate::runtime::hooks::PostSuiteHook;
use crate::runtime::hooks::PreSuiteHook;
use crate::runtime::hooks::PreTestHook;

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Named, immutable suite definition.
pub struct Suite {
    /// Unique suite name.
    name: SuiteName,
    /// Normalized human-readable description.
    description: String,
    /// Membership predicate.
    predicate: SuitePredicate,
    /// Declared execution policy.
    policy: SuitePolicy,
    /// Hook run before selection.
    pre_suite: Option<Arc<dyn PreSuiteHook>>,
    /// Hook run after dispatch.
    post_suite: Option<Arc<dyn PostSuiteHook>>,
    /// Hook run before each test.
    pre_test: Option<Arc<dyn PreTestHook>>,
}

impl Suite {
    /// Creates a suite with default policy and no hooks.
    #[must_use]
    pub fn new(
        name: impl Into<SuiteName>,
        description: &str,
        predicate: SuitePredicate,
    ) -> Self {
        Self {
            name: name.into(),
            description: normalize_description(description),
            predicate,
            policy: SuitePolicy::new(),
            pre_suite: None,
            post_suite: None,
            pre_test: None,
        }
    }

    /// Sets the declared execution policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SuitePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the `PreSuite` hook.
    #[must_use]
    pub fn with_pre_suite(mut self, hook: Arc<dyn PreSuiteHook>) -> Self {
        self.pre_suite = Some(hook);
        self
    }

    /// Sets the `PostSuite` hook.
    #[must_use]
    pub fn with_post_suite(mut self, hook: Arc<dyn PostSuiteHook>) -> Self {
        self.post_suite = Some(hook);
        self
    }

    /// Sets the `PreTest` hook.
    #[must_use]
    pub fn with_pre_test(mut self, hook: Arc<dyn PreTestHook>) -> Self {
        self.pre_test = Some(hook);
        self
    }

    /// Returns the suite name.
    #[must_use]
    pub const fn name(&self) -> &SuiteName {
        &self.name
    }

    /// Returns the normalized description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the membership predicate.
    #[must_use]
    pub const fn predicate(&self) -> &SuitePredicate {
        &self.predicate
    }

    /// Returns the declared policy.
    #[must_use]
    pub const fn policy(&self) -> &SuitePolicy {
        &self.policy
    }

    /// Returns the `PreSuite` hook, if any.
    #[must_use]
    pub const fn pre_suite(&self) -> Option<&Arc<dyn PreSuiteHook>> {
        self.pre_suite.as_ref()
    }

    /// Returns the `PostSuite` hook, if any.
    #[must_use]
    pub const fn post_suite(&self) -> Option<&Arc<dyn PostSuiteHook>> {
        self.post_suite.as_ref()
    }

    /// Returns the `PreTest` hook, if any.
    #[must_use]
    pub const fn pre_test(&self) -> Option<&Arc<dyn PreTestHook>> {
        self.pre_test.as_ref()
    }

    /// Returns true when the test belongs to the suite at the wall clock.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.predicate.matches(name)
    }

    /// Returns true when the test belongs to the suite at `now`.
    #[must_use]
    pub fn matches_at(&self, name: &str, now: OffsetDateTime) -> bool {
        self.predicate.matches_at(name, now)
    }

    /// Selects the suite's members from `universe` at `now`, preserving order.
    #[must_use]
    pub fn filter_at<'a>(&self, universe: &'a [String], now: OffsetDateTime) -> Vec<&'a str> {
        universe
            .iter()
            .map(String::as_str)
            .filter(|name| self.predicate.matches_at(name, now))
            .collect()
    }

    /// Resolves the declared policy against system defaults.
    #[must_use]
    pub fn resolve_policy(&self, defaults: &PolicyDefaults) -> EffectivePolicy {
        self.policy.resolve(defaults)
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("pre_suite", &self.pre_suite.as_ref().map(|hook| hook.name()))
            .field("post_suite", &self.post_suite.as_ref().map(|hook| hook.name()))
            .field("pre_test", &self.pre_test.as_ref().map(|hook| hook.name()))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Trims each line and the whole text.
fn normalize_description(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n").trim().to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
