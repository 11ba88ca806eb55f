// crates/suite-gate-core/src/runtime/hooks.rs
// ============================================================================
// Module: Suite Gate Lifecycle Hooks
// Description: PreSuite, PostSuite, and PreTest hook contracts and built-ins.
// Purpose: Run provider setup and teardown around a suite and its tests.
// Dependencies: thiserror, crate::{interfaces, runtime::options}
// ============================================================================

//! ## Overview
//! Hooks are owned by suites through `Arc` references and may block or fail.
//! Each hook runs exactly once per occurrence: `PreSuite` before selection,
//! `PostSuite` after dispatch completes, `PreTest` before each test body.
//!
//! The built-in hooks reproduce the standard provider chain:
//! [`InitializeProvider`] resolves the provider, [`ProviderFiltered`] also
//! narrows selection to it, [`NoProvider`] forces the `none` provider first,
//! and [`KubeFrameworkInit`] additionally prepares the test framework.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::interfaces::ProviderConfig;
use crate::interfaces::ProviderError;
use crate::interfaces::ProviderRequest;
use crate::interfaces::SuiteEnvironment;
use crate::runtime::options::RunOptions;

// ============================================================================
// SECTION: Hook Contracts
// ============================================================================

/// Provider identifier that disables provider-specific setup.
pub const NO_PROVIDER: &str = "none";

/// Hook failures.
#[derive(Debug, Error)]
pub enum HookError {
    /// Provider resolution or environment setup failed.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// Hook-specific failure.
    #[error("hook failed: {0}")]
    Failed(String),
}

/// Hook run once before test selection.
pub trait PreSuiteHook: Send + Sync {
    /// Returns a stable hook label for diagnostics.
    fn name(&self) -> &'static str;

    /// Prepares the run, optionally installing a narrowing filter.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] when setup fails; the suite is not dispatched.
    fn run(&self, options: &mut RunOptions) -> Result<(), HookError>;
}

/// Hook run once after dispatch completes.
pub trait PostSuiteHook: Send + Sync {
    /// Returns a stable hook label for diagnostics.
    fn name(&self) -> &'static str;

    /// Tears down or reports after the run.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] when teardown fails; the failure is only recorded.
    fn run(&self, options: &mut RunOptions) -> Result<(), HookError>;
}

/// Hook run immediately before each test body.
pub trait PreTestHook: Send + Sync {
    /// Returns a stable hook label for diagnostics.
    fn name(&self) -> &'static str;

    /// Prepares a single test.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] when setup fails; the test is marked failed.
    fn run(&self) -> Result<(), HookError>;
}

// ============================================================================
// SECTION: Built-In PreSuite Hooks
// ============================================================================

/// Resolves `options.provider` and stores the configuration.
fn initialize_provider(
    environment: &dyn SuiteEnvironment,
    options: &mut RunOptions,
) -> Result<Arc<dyn ProviderConfig>, HookError> {
    let request = ProviderRequest {
        identifier: &options.provider,
        dry_run: options.dry_run,
        initialize: true,
        overrides: options.provider_overrides.as_ref(),
    };
    let config = environment.decode_provider(&request)?;
    options.provider = config.to_json_string();
    options.set_provider_config(Arc::clone(&config));
    Ok(config)
}

/// Resolves the provider and installs its narrowing filter.
fn filter_by_provider(
    environment: &dyn SuiteEnvironment,
    options: &mut RunOptions,
) -> Result<Arc<dyn ProviderConfig>, HookError> {
    let config = initialize_provider(environment, options)?;
    options.set_match_fn(config.match_fn());
    Ok(config)
}

/// Resolves the provider without narrowing selection.
pub struct InitializeProvider {
    /// Environment used for provider resolution.
    environment: Arc<dyn SuiteEnvironment>,
}

impl InitializeProvider {
    /// Creates the hook.
    #[must_use]
    pub fn new(environment: Arc<dyn SuiteEnvironment>) -> Self {
        Self {
            environment,
        }
    }
}

impl PreSuiteHook for InitializeProvider {
    fn name(&self) -> &'static str {
        "initialize_provider"
    }

    fn run(&self, options: &mut RunOptions) -> Result<(), HookError> {
        initialize_provider(self.environment.as_ref(), options).map(|_| ())
    }
}

/// Resolves the provider and restricts selection to tests it accepts.
pub struct ProviderFiltered {
    /// Environment used for provider resolution.
    environment: Arc<dyn SuiteEnvironment>,
}

impl ProviderFiltered {
    /// Creates the hook.
    #[must_use]
    pub fn new(environment: Arc<dyn SuiteEnvironment>) -> Self {
        Self {
            environment,
        }
    }
}

impl PreSuiteHook for ProviderFiltered {
    fn name(&self) -> &'static str {
        "provider_filtered"
    }

    fn run(&self, options: &mut RunOptions) -> Result<(), HookError> {
        filter_by_provider(self.environment.as_ref(), options).map(|_| ())
    }
}

/// Forces the `none` provider, then behaves like [`ProviderFiltered`].
pub struct NoProvider {
    /// Environment used for provider resolution.
    environment: Arc<dyn SuiteEnvironment>,
}

impl NoProvider {
    /// Creates the hook.
    #[must_use]
    pub fn new(environment: Arc<dyn SuiteEnvironment>) -> Self {
        Self {
            environment,
        }
    }
}

impl PreSuiteHook for NoProvider {
    fn name(&self) -> &'static str {
        "no_provider"
    }

    fn run(&self, options: &mut RunOptions) -> Result<(), HookError> {
        NO_PROVIDER.clone_into(&mut options.provider);
        filter_by_provider(self.environment.as_ref(), options).map(|_| ())
    }
}

/// Behaves like [`ProviderFiltered`], then initializes the test framework.
pub struct KubeFrameworkInit {
    /// Environment used for provider resolution and framework setup.
    environment: Arc<dyn SuiteEnvironment>,
}

impl KubeFrameworkInit {
    /// Creates the hook.
    #[must_use]
    pub fn new(environment: Arc<dyn SuiteEnvironment>) -> Self {
        Self {
            environment,
        }
    }
}

impl PreSuiteHook for KubeFrameworkInit {
    fn name(&self) -> &'static str {
        "kube_framework_init"
    }

    fn run(&self, options: &mut RunOptions) -> Result<(), HookError> {
        let config = filter_by_provider(self.environment.as_ref(), options)?;
        self.environment.initialize_test_framework(config.as_ref(), options.dry_run)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Built-In PostSuite Hooks
// ============================================================================

/// Writes storage driver capabilities to the run output.
pub struct StorageCapabilities {
    /// Environment that reports capabilities.
    environment: Arc<dyn SuiteEnvironment>,
}

impl StorageCapabilities {
    /// Creates the hook.
    #[must_use]
    pub fn new(environment: Arc<dyn SuiteEnvironment>) -> Self {
        Self {
            environment,
        }
    }
}

impl PostSuiteHook for StorageCapabilities {
    fn name(&self) -> &'static str {
        "storage_capabilities"
    }

    fn run(&self, options: &mut RunOptions) -> Result<(), HookError> {
        self.environment.write_storage_capabilities(options.out())?;
        Ok(())
    }
}
