// crates/suite-gate-config/src/config.rs
// ============================================================================
// Module: Suite Gate Configuration
// Description: Configuration loading and validation for Suite Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: suite-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; omitted values fall back to the built-in
//! defaults, and out-of-range values are rejected with the offending field
//! name. Allow-list files and the audit log are opened lazily by the
//! accessor helpers so that validation itself performs no I/O beyond reading
//! the config file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use suite_gate_core::AllowList;
use suite_gate_core::CuratedLists;
use suite_gate_core::PolicyDefaults;
use suite_gate_core::RunOptions;
use suite_gate_core::SuiteAuditSink;
use suite_gate_core::SuiteRunnerConfig;
use suite_gate_core::runtime::SuiteFileAuditSink;
use suite_gate_core::runtime::SuiteNoopAuditSink;
use suite_gate_core::runtime::SuiteStderrAuditSink;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "suite-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "SUITE_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum allow-list file size in bytes.
pub(crate) const MAX_ALLOW_LIST_FILE_SIZE: usize = 8 * 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum provider identifier length.
pub(crate) const MAX_PROVIDER_LENGTH: usize = 64 * 1024;
/// Maximum default parallelism.
pub(crate) const MAX_PARALLELISM: u32 = 1024;
/// Maximum default per-test timeout in seconds (one day).
pub(crate) const MAX_TEST_TIMEOUT_SECS: u64 = 86_400;
/// Maximum default repetition count.
pub(crate) const MAX_REPETITION_COUNT: u32 = 1000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Suite Gate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuiteGateConfig {
    /// Run options applied to every suite execution.
    #[serde(default)]
    pub run: RunConfig,
    /// Fallbacks for unset suite policy fields.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Lifecycle audit logging.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Curated allow-list files.
    #[serde(default)]
    pub allow_lists: AllowListsConfig,
}

impl SuiteGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let content = read_bounded(&resolved, MAX_CONFIG_FILE_SIZE, "config file")?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.defaults.validate()?;
        self.audit.validate()?;
        self.allow_lists.validate()
    }

    /// Returns the policy fallbacks derived from `[defaults]`.
    #[must_use]
    pub const fn policy_defaults(&self) -> PolicyDefaults {
        PolicyDefaults {
            parallelism: self.defaults.parallelism,
            test_timeout: Duration::from_secs(self.defaults.test_timeout_secs),
            repetition_count: self.defaults.repetition_count,
        }
    }

    /// Returns the runner configuration.
    #[must_use]
    pub const fn runner_config(&self) -> SuiteRunnerConfig {
        SuiteRunnerConfig {
            defaults: self.policy_defaults(),
        }
    }

    /// Builds fresh run options writing hook output to `out`.
    #[must_use]
    pub fn run_options(&self, out: Box<dyn Write + Send>) -> RunOptions {
        RunOptions::new(self.run.provider.clone(), self.run.dry_run).with_output(out)
    }

    /// Loads the curated allow-lists; unset lists are empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a list file cannot be read.
    pub fn curated_lists(&self) -> Result<CuratedLists, ConfigError> {
        Ok(CuratedLists {
            minimal: Arc::new(load_allow_list("minimal", self.allow_lists.minimal.as_deref())?),
            cni: Arc::new(load_allow_list("cni", self.allow_lists.cni.as_deref())?),
        })
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn SuiteAuditSink>, ConfigError> {
        match self.audit.sink {
            AuditSinkKind::None => Ok(Arc::new(SuiteNoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(SuiteStderrAuditSink)),
            AuditSinkKind::File => {
                let path = self
                    .audit
                    .path
                    .as_deref()
                    .ok_or_else(|| ConfigError::Invalid("audit.path is required".to_string()))?;
                let sink = SuiteFileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

/// Run options applied to every suite execution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Provider identifier passed to provider resolution (empty = discover).
    #[serde(default)]
    pub provider: String,
    /// Resolve providers without touching a cluster.
    #[serde(default)]
    pub dry_run: bool,
}

impl RunConfig {
    /// Validates run options.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.len() > MAX_PROVIDER_LENGTH {
            return Err(ConfigError::Invalid("run.provider exceeds max length".to_string()));
        }
        Ok(())
    }
}

/// Fallbacks for unset suite policy fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Parallelism for suites that declare none.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Per-test timeout in seconds for suites that declare none.
    #[serde(default = "default_test_timeout_secs")]
    pub test_timeout_secs: u64,
    /// Repetition count for suites that declare none.
    #[serde(default = "default_repetition_count")]
    pub repetition_count: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            test_timeout_secs: default_test_timeout_secs(),
            repetition_count: default_repetition_count(),
        }
    }
}

impl DefaultsConfig {
    /// Validates default ranges.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_range("defaults.parallelism", u64::from(self.parallelism), 1, u64::from(MAX_PARALLELISM))?;
        validate_range("defaults.test_timeout_secs", self.test_timeout_secs, 1, MAX_TEST_TIMEOUT_SECS)?;
        validate_range(
            "defaults.repetition_count",
            u64::from(self.repetition_count),
            1,
            u64::from(MAX_REPETITION_COUNT),
        )
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Lifecycle audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Sink receiving lifecycle events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (JSON lines) for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.sink, &self.path) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required when audit.sink = \"file\"".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid with audit.sink = \"file\"".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

/// Curated allow-list files: one exact test name per line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllowListsConfig {
    /// Highly reliable conformance tests.
    #[serde(default)]
    pub minimal: Option<String>,
    /// Tests certified for third-party CNI plugins.
    #[serde(default)]
    pub cni: Option<String>,
}

impl AllowListsConfig {
    /// Validates allow-list paths.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.minimal {
            validate_path_string("allow_lists.minimal", path)?;
        }
        if let Some(path) = &self.cni {
            validate_path_string("allow_lists.cni", path)?;
        }
        Ok(())
    }
}

/// Default parallelism.
const fn default_parallelism() -> u32 {
    suite_gate_core::core::policy::DEFAULT_PARALLELISM
}

/// Default per-test timeout in seconds.
const fn default_test_timeout_secs() -> u64 {
    suite_gate_core::core::policy::DEFAULT_TEST_TIMEOUT.as_secs()
}

/// Default repetition count.
const fn default_repetition_count() -> u32 {
    suite_gate_core::core::policy::DEFAULT_REPETITION_COUNT
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates an inclusive numeric range.
fn validate_range(field: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid(format!("{field} must be between {min} and {max}")));
    }
    Ok(())
}

/// Reads a UTF-8 file no larger than `limit` bytes.
fn read_bounded(path: &Path, limit: usize, label: &str) -> Result<String, ConfigError> {
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > limit {
        return Err(ConfigError::Invalid(format!("{label} exceeds size limit")));
    }
    String::from_utf8(bytes).map_err(|_| ConfigError::Invalid(format!("{label} must be utf-8")))
}

/// Loads a named allow-list file, or an empty list when unset.
fn load_allow_list(name: &str, path: Option<&str>) -> Result<AllowList, ConfigError> {
    let Some(path) = path else {
        return Ok(AllowList::empty(name));
    };
    let content = read_bounded(Path::new(path.trim()), MAX_ALLOW_LIST_FILE_SIZE, "allow-list file")?;
    Ok(AllowList::parse(name, &content))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
