// crates/suite-gate-core/src/core/allow_list.rs
// ============================================================================
// Module: Suite Gate Allow Lists
// Description: Curated sets of exact test names.
// Purpose: Back allow-list predicates for curated reliability subsets.
// Dependencies: std
// ============================================================================

//! ## Overview
//! An allow-list is an externally supplied set of full test names. Membership
//! is exact string equality; tags inside the names are not interpreted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

// ============================================================================
// SECTION: Allow List
// ============================================================================

/// Named set of exact test names.
///
/// # Invariants
/// - Entries are never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowList {
    /// Label used in diagnostics.
    name: String,
    /// Exact test names.
    entries: BTreeSet<String>,
}

impl AllowList {
    /// Creates an allow-list from exact test names, dropping empty entries.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entries: entries.into_iter().map(Into::into).filter(|entry| !entry.is_empty()).collect(),
        }
    }

    /// Creates an empty allow-list.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty::<String>())
    }

    /// Parses a line-oriented list: one test name per line, blank lines and
    /// lines starting with `#` are ignored.
    #[must_use]
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string);
        Self::new(name, entries)
    }

    /// Returns the diagnostic label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when the exact test name is listed.
    #[must_use]
    pub fn contains(&self, test: &str) -> bool {
        self.entries.contains(test)
    }

    /// Returns the number of listed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
