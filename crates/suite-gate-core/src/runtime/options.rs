// crates/suite-gate-core/src/runtime/options.rs
// ============================================================================
// Module: Suite Gate Run Options
// Description: Mutable per-run context shared by lifecycle hooks.
// Purpose: Carry provider selection, narrowing filter, and output between phases.
// Dependencies: serde_json, crate::interfaces
// ============================================================================

//! ## Overview
//! [`RunOptions`] is owned by exactly one suite run. `PreSuite` hooks resolve
//! the provider into it and may install a narrowing filter; the runner then
//! selects tests that satisfy both the suite predicate and that filter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;

use serde_json::Value;

use crate::interfaces::NameMatcher;
use crate::interfaces::ProviderConfig;

// ============================================================================
// SECTION: Run Options
// ============================================================================

/// Mutable context for one suite execution.
pub struct RunOptions {
    /// Requested provider identifier; replaced by its JSON form once resolved.
    pub provider: String,
    /// Dry-run flag passed to provider resolution and framework setup.
    pub dry_run: bool,
    /// Optional structured overrides passed to provider resolution.
    pub provider_overrides: Option<Value>,
    /// Resolved provider configuration.
    provider_config: Option<Arc<dyn ProviderConfig>>,
    /// Narrowing filter installed by a hook.
    match_fn: Option<Arc<dyn NameMatcher>>,
    /// Output sink for hook-generated text.
    out: Box<dyn Write + Send>,
}

impl RunOptions {
    /// Creates options that discard hook output.
    #[must_use]
    pub fn new(provider: impl Into<String>, dry_run: bool) -> Self {
        Self {
            provider: provider.into(),
            dry_run,
            provider_overrides: None,
            provider_config: None,
            match_fn: None,
            out: Box::new(io::sink()),
        }
    }

    /// Replaces the output sink.
    #[must_use]
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    /// Returns the resolved provider configuration, if any.
    #[must_use]
    pub fn provider_config(&self) -> Option<&Arc<dyn ProviderConfig>> {
        self.provider_config.as_ref()
    }

    /// Stores the resolved provider configuration.
    pub fn set_provider_config(&mut self, config: Arc<dyn ProviderConfig>) {
        self.provider_config = Some(config);
    }

    /// Returns the narrowing filter, if a hook installed one.
    #[must_use]
    pub fn match_fn(&self) -> Option<&Arc<dyn NameMatcher>> {
        self.match_fn.as_ref()
    }

    /// Installs a narrowing filter.
    pub fn set_match_fn(&mut self, matcher: Arc<dyn NameMatcher>) {
        self.match_fn = Some(matcher);
    }

    /// Returns true when the narrowing filter accepts the name (or none is set).
    #[must_use]
    pub fn narrows(&self, name: &str) -> bool {
        self.match_fn.as_ref().is_none_or(|matcher| matcher.matches(name))
    }

    /// Returns the output sink.
    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("provider", &self.provider)
            .field("dry_run", &self.dry_run)
            .field("provider_overrides", &self.provider_overrides)
            .field("provider_config", &self.provider_config.is_some())
            .field("match_fn", &self.match_fn.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
