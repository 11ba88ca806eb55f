// crates/suite-gate-core/src/runtime/registry.rs
// ============================================================================
// Module: Suite Gate Registry
// Description: Ordered, immutable collection of named suites.
// Purpose: Resolve suite names to definitions and reject invalid declarations.
// Dependencies: thiserror, crate::{core, runtime::suite}
// ============================================================================

//! ## Overview
//! The registry is built once from a fixed list of suites and is read-only
//! afterwards, so it can be shared across threads. Construction fails closed
//! on empty or duplicate names and on carve-outs that lack a tracking
//! reference. Iteration follows declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::SuiteName;
use crate::runtime::suite::Suite;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry construction and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A suite was declared with an empty name.
    #[error("suite name must not be empty")]
    EmptySuiteName,
    /// Two suites share a name.
    #[error("duplicate suite name: {0}")]
    DuplicateSuite(SuiteName),
    /// A carve-out has no tracking reference.
    #[error("suite {suite} carve-out `{pattern}` has no tracking reference")]
    UntrackedCarveout {
        /// Suite declaring the carve-out.
        suite: SuiteName,
        /// Excluded substring.
        pattern: String,
    },
    /// No suite has the requested name.
    #[error("unknown suite {name}; known suites: {known}")]
    UnknownSuite {
        /// Requested name.
        name: String,
        /// Comma-separated list of registered names.
        known: String,
    },
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Immutable registry of suites keyed by unique name.
///
/// # Invariants
/// - Names are unique and non-empty.
/// - `index` maps every name to its position in `suites`.
#[derive(Debug)]
pub struct SuiteRegistry {
    /// Suites in declaration order.
    suites: Vec<Suite>,
    /// Name to position lookup.
    index: BTreeMap<SuiteName, usize>,
}

impl SuiteRegistry {
    /// Builds a registry from suite declarations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for empty or duplicate names and untracked
    /// carve-outs.
    pub fn new(suites: impl IntoIterator<Item = Suite>) -> Result<Self, RegistryError> {
        let suites: Vec<Suite> = suites.into_iter().collect();
        let mut index = BTreeMap::new();
        for (position, suite) in suites.iter().enumerate() {
            if suite.name().as_str().is_empty() {
                return Err(RegistryError::EmptySuiteName);
            }
            if let Some(carveout) =
                suite.predicate().carveouts().iter().find(|carveout| carveout.tracking().trim().is_empty())
            {
                return Err(RegistryError::UntrackedCarveout {
                    suite: suite.name().clone(),
                    pattern: carveout.pattern().to_string(),
                });
            }
            if index.insert(suite.name().clone(), position).is_some() {
                return Err(RegistryError::DuplicateSuite(suite.name().clone()));
            }
        }
        Ok(Self {
            suites,
            index,
        })
    }

    /// Returns the suite with the exact name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Suite> {
        self.index.get(name).and_then(|position| self.suites.get(*position))
    }

    /// Returns the suite with the exact name or a user-facing error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSuite`] listing the registered names.
    pub fn require(&self, name: &str) -> Result<&Suite, RegistryError> {
        self.lookup(name).ok_or_else(|| RegistryError::UnknownSuite {
            name: name.to_string(),
            known: self.names().map(SuiteName::as_str).collect::<Vec<_>>().join(", "),
        })
    }

    /// Returns suites in declaration order.
    #[must_use]
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Iterates suites in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Suite> {
        self.suites.iter()
    }

    /// Iterates suite names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &SuiteName> {
        self.suites.iter().map(Suite::name)
    }

    /// Returns the number of suites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Returns true when no suites are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl<'a> IntoIterator for &'a SuiteRegistry {
    type IntoIter = std::slice::Iter<'a, Suite>;
    type Item = &'a Suite;

    fn into_iter(self) -> Self::IntoIter {
        self.suites.iter()
    }
}
