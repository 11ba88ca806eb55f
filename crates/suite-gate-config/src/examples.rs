// crates/suite-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Suite Gate configuration. The payload parses and
//! validates; the tests keep it that way.

/// Returns a canonical example `suite-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[run]
provider = ""
dry_run = false

[defaults]
parallelism = 1
test_timeout_secs = 900
repetition_count = 1

[audit]
sink = "file"
path = "suite-gate-audit.jsonl"

[allow_lists]
minimal = "lists/minimal.txt"
cni = "lists/cni.txt"
"#,
    )
}
