// crates/suite-gate-core/src/runtime/audit.rs
// ============================================================================
// Module: Suite Gate Audit Logging
// Description: Structured audit events for suite lifecycle transitions.
// Purpose: Emit JSON-line lifecycle records without a logging framework.
// Dependencies: serde, serde_json, crate::runtime::runner
// ============================================================================

//! ## Overview
//! The runner records one [`SuiteAuditEvent`] per lifecycle transition.
//! Sinks serialize events as JSON lines; serialization and write failures are
//! dropped so auditing never changes a run's outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::runtime::runner::RunPhase;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Transition completed normally.
    Ok,
    /// Transition failed.
    Error,
}

/// Suite lifecycle audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Suite name.
    pub suite: String,
    /// Lifecycle phase entered.
    pub phase: RunPhase,
    /// Transition outcome.
    pub outcome: AuditOutcome,
    /// Hook label when a hook ran.
    pub hook: Option<&'static str>,
    /// Number of selected tests when known.
    pub test_count: Option<usize>,
    /// Error or status message.
    pub message: Option<String>,
}

/// Inputs required to construct a suite audit event.
pub struct SuiteAuditEventParams {
    /// Suite name.
    pub suite: String,
    /// Lifecycle phase entered.
    pub phase: RunPhase,
    /// Transition outcome.
    pub outcome: AuditOutcome,
    /// Hook label when a hook ran.
    pub hook: Option<&'static str>,
    /// Number of selected tests when known.
    pub test_count: Option<usize>,
    /// Error or status message.
    pub message: Option<String>,
}

impl SuiteAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: SuiteAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "suite_lifecycle",
            timestamp_ms,
            suite: params.suite,
            phase: params.phase,
            outcome: params.outcome,
            hook: params.hook,
            test_count: params.test_count,
            message: params.message,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for suite lifecycle events.
pub trait SuiteAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &SuiteAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct SuiteStderrAuditSink;

impl SuiteAuditSink for SuiteStderrAuditSink {
    fn record(&self, event: &SuiteAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct SuiteFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl SuiteFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl SuiteAuditSink for SuiteFileAuditSink {
    fn record(&self, event: &SuiteAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct SuiteNoopAuditSink;

impl SuiteAuditSink for SuiteNoopAuditSink {
    fn record(&self, _event: &SuiteAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::indexing_slicing,
        reason = "Test-only assertions on serialized audit lines."
    )]

    use super::AuditOutcome;
    use super::SuiteAuditEvent;
    use super::SuiteAuditEventParams;
    use super::SuiteAuditSink;
    use super::SuiteFileAuditSink;
    use crate::runtime::runner::RunPhase;

    #[test]
    fn file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = SuiteFileAuditSink::new(&path).unwrap();
        for phase in [RunPhase::PreSuiteRunning, RunPhase::Filtering] {
            sink.record(&SuiteAuditEvent::new(SuiteAuditEventParams {
                suite: "openshift/build".to_string(),
                phase,
                outcome: AuditOutcome::Ok,
                hook: None,
                test_count: Some(3),
                message: None,
            }));
        }
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> =
            content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "suite_lifecycle");
        assert_eq!(lines[0]["phase"], "pre_suite_running");
        assert_eq!(lines[1]["phase"], "filtering");
        assert_eq!(lines[1]["test_count"], 3);
    }
}
