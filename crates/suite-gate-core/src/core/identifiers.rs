// crates/suite-gate-core/src/core/identifiers.rs
// ============================================================================
// Module: Suite Gate Identifiers
// Description: Opaque identifiers for registered suites.
// Purpose: Provide a strongly typed, serializable suite name.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Suite names are opaque, case-sensitive strings such as
//! `openshift/conformance/parallel`. Uniqueness is enforced by the registry,
//! not by this wrapper.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Unique name of a registered suite.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiteName(String);

impl SuiteName {
    /// Creates a new suite name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SuiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Borrow<str> for SuiteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SuiteName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SuiteName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
