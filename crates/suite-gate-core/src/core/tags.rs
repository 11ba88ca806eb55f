// crates/suite-gate-core/src/core/tags.rs
// ============================================================================
// Module: Suite Gate Name Tags
// Description: Bracketed tag vocabulary embedded in test names.
// Purpose: Centralize the exact tag substrings shared with external tooling.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Tests carry their metadata inside their display names as bracketed tags
//! such as `[Suite:openshift/conformance/parallel]` or `[Feature:Builds]`.
//! Names are never parsed globally: tags may be malformed, so every check is a
//! case-sensitive substring test against one of the shapes defined here.
//! These strings are a shared external contract and must not be normalized.

// ============================================================================
// SECTION: Tag Constants
// ============================================================================

/// Prefix marking explicit disablement (`[Disabled]`, `[Disabled:reason]`).
pub const DISABLED_TAG_PREFIX: &str = "[Disabled";

/// Pre-condition test marker.
pub const EARLY_TAG: &str = "[Early]";

/// Post-condition test marker.
pub const LATE_TAG: &str = "[Late]";

/// Tests that cannot run in parallel with a copy of themselves.
pub const SERIAL_SELF_TAG: &str = "[Serial:Self]";

/// Tests that must run on the local host.
pub const LOCAL_TAG: &str = "[Local]";

/// Tests that disrupt the cluster.
pub const DISRUPTIVE_TAG: &str = "[Disruptive]";

/// Upstream Kubernetes conformance marker.
pub const CONFORMANCE_TAG: &str = "[Conformance]";

/// Open prefix matching every OpenShift conformance sub-suite.
pub const CONFORMANCE_SUITE_PREFIX: &str = "[Suite:openshift/conformance/";

/// Open prefix matching the parallel conformance suite.
///
/// The closing bracket is omitted on purpose: suffixed variants of the tag
/// still belong to the parallel suite.
pub const CONFORMANCE_PARALLEL_SUITE_PREFIX: &str = "[Suite:openshift/conformance/parallel";

/// Open prefix matching the serial conformance suite.
pub const CONFORMANCE_SERIAL_SUITE_PREFIX: &str = "[Suite:openshift/conformance/serial";

/// Substring identifying external CSI driver tests.
pub const EXTERNAL_STORAGE_DRIVER_PREFIX: &str = "External Storage [Driver:";

// ============================================================================
// SECTION: Tag Builders
// ============================================================================

/// Returns the closed `[Suite:<name>]` tag.
#[must_use]
pub fn suite_tag(suite: &str) -> String {
    format!("[Suite:{suite}]")
}

/// Returns the closed `[Feature:<name>]` tag.
#[must_use]
pub fn feature_tag(feature: &str) -> String {
    format!("[Feature:{feature}]")
}

/// Returns the closed `[sig-<name>]` tag.
#[must_use]
pub fn sig_tag(sig: &str) -> String {
    format!("[sig-{sig}]")
}

// ============================================================================
// SECTION: Tag Queries
// ============================================================================

/// Returns true when the name contains the tag substring verbatim.
#[must_use]
pub fn has_tag(name: &str, tag: &str) -> bool {
    name.contains(tag)
}

/// Returns true if a test is part of the standard pre-condition tests.
///
/// Standard early tests carry `[Early]` and belong to the parallel
/// conformance suite. Disruptive suites inject them to check cluster health
/// before running, without the post-condition checks.
#[must_use]
pub fn is_standard_early_test(name: &str) -> bool {
    if !name.contains(EARLY_TAG) {
        return false;
    }
    name.contains(CONFORMANCE_PARALLEL_SUITE_PREFIX)
}

/// Returns true if a test is part of the standard pre or post condition tests.
#[must_use]
pub fn is_standard_early_or_late_test(name: &str) -> bool {
    if !name.contains(EARLY_TAG) && !name.contains(LATE_TAG) {
        return false;
    }
    name.contains(CONFORMANCE_PARALLEL_SUITE_PREFIX)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
