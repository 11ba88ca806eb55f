// crates/suite-gate-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared builders for configuration tests.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use suite_gate_config::SuiteGateConfig;

/// Parses a config from TOML text without validating it.
pub fn config_from_toml(toml_str: &str) -> Result<SuiteGateConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns the config produced by an empty file.
pub fn minimal_config() -> Result<SuiteGateConfig, toml::de::Error> {
    config_from_toml("")
}

/// Writes `content` to `name` under `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> Result<PathBuf, String> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|err| err.to_string())?;
    Ok(path)
}
