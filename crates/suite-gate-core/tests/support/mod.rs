// crates/suite-gate-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Fake environment, engine, and audit sink for runner tests.
// ============================================================================
//! ## Overview
//! Shared fakes that record every interaction so lifecycle ordering can be
//! asserted without a cluster or a test framework.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test helpers are selectively used across suites."
)]

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use suite_gate_core::EngineError;
use suite_gate_core::ExecutionEngine;
use suite_gate_core::ExecutionSummary;
use suite_gate_core::FixedClock;
use suite_gate_core::NameMatcher;
use suite_gate_core::ProviderConfig;
use suite_gate_core::ProviderError;
use suite_gate_core::ProviderRequest;
use suite_gate_core::SuiteEnvironment;
use suite_gate_core::runtime::DispatchPlan;
use suite_gate_core::runtime::SuiteAuditEvent;
use suite_gate_core::runtime::SuiteAuditSink;
use time::Date;
use time::Month;
use time::OffsetDateTime;

// ========================================================================
// Fixtures
// ========================================================================

/// Returns midnight UTC on the given date.
pub fn midnight(year: i32, month: Month, day: u8) -> OffsetDateTime {
    Date::from_calendar_date(year, month, day).unwrap().midnight().assume_utc()
}

/// Returns a clock pinned to midnight UTC on the given date.
pub fn fixed_clock(year: i32, month: Month, day: u8) -> Arc<FixedClock> {
    Arc::new(FixedClock(midnight(year, month, day)))
}

/// Builds an owned test universe.
pub fn universe(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Shared log of interactions across fakes.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// Returns a fresh call log.
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Returns a snapshot of the call log.
pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ========================================================================
// Provider and Environment
// ========================================================================

/// Provider that skips tests tagged `[Skipped:<name>]`.
pub struct FakeProvider {
    pub name: String,
}

impl ProviderConfig for FakeProvider {
    fn match_fn(&self) -> Arc<dyn NameMatcher> {
        let skip = format!("[Skipped:{}]", self.name);
        Arc::new(move |test: &str| !test.contains(&skip))
    }

    fn to_json_string(&self) -> String {
        serde_json::json!({ "type": self.name }).to_string()
    }
}

/// Environment recording provider requests and framework setup.
pub struct FakeEnvironment {
    pub log: CallLog,
    pub fail_decode: bool,
    pub fail_initialize: bool,
}

impl FakeEnvironment {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_decode: false,
            fail_initialize: false,
        }
    }
}

impl SuiteEnvironment for FakeEnvironment {
    fn decode_provider(
        &self,
        request: &ProviderRequest<'_>,
    ) -> Result<Arc<dyn ProviderConfig>, ProviderError> {
        self.log.lock().unwrap().push(format!(
            "decode:{}:dry_run={}:initialize={}",
            request.identifier, request.dry_run, request.initialize
        ));
        if self.fail_decode {
            return Err(ProviderError::Decode(format!("cannot reach {}", request.identifier)));
        }
        let name = if request.identifier.is_empty() { "skeleton" } else { request.identifier };
        Ok(Arc::new(FakeProvider {
            name: name.to_string(),
        }))
    }

    fn initialize_test_framework(
        &self,
        config: &dyn ProviderConfig,
        dry_run: bool,
    ) -> Result<(), ProviderError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("init_framework:{}:dry_run={dry_run}", config.to_json_string()));
        if self.fail_initialize {
            return Err(ProviderError::Initialize("no kubeconfig".to_string()));
        }
        Ok(())
    }

    fn write_storage_capabilities(&self, out: &mut dyn Write) -> Result<(), ProviderError> {
        self.log.lock().unwrap().push("storage_capabilities".to_string());
        writeln!(out, "snapshot: true").map_err(|err| ProviderError::Output(err.to_string()))
    }
}

// ========================================================================
// Engine
// ========================================================================

/// Engine that records the plan, runs per-test setup, and reports a
/// scripted summary.
pub struct RecordingEngine {
    pub log: CallLog,
    pub plans: Mutex<Vec<(Vec<String>, suite_gate_core::EffectivePolicy)>>,
    pub flaky: usize,
    pub fail_with: Option<String>,
}

impl RecordingEngine {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            plans: Mutex::new(Vec::new()),
            flaky: 0,
            fail_with: None,
        }
    }
}

impl ExecutionEngine for RecordingEngine {
    fn execute(&self, plan: &DispatchPlan) -> Result<ExecutionSummary, EngineError> {
        self.log.lock().unwrap().push(format!("execute:{}", plan.tests.len()));
        self.plans.lock().unwrap().push((plan.tests.clone(), plan.policy));
        if let Some(message) = &self.fail_with {
            return Err(EngineError::Failed(message.clone()));
        }
        let mut summary = ExecutionSummary::default();
        for (index, test) in plan.tests.iter().enumerate() {
            if plan.prepare_test(test).is_err() {
                summary.failed.push(test.clone());
            } else if index < self.flaky {
                summary.flaky.push(test.clone());
            } else {
                summary.passed.push(test.clone());
            }
        }
        Ok(summary)
    }
}

// ========================================================================
// Audit and Output
// ========================================================================

/// Audit sink collecting events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    pub events: Mutex<Vec<SuiteAuditEvent>>,
}

impl SuiteAuditSink for MemoryAuditSink {
    fn record(&self, event: &SuiteAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Writer appending into a shared buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
