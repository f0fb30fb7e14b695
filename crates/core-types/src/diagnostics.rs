//! Diagnostic records emitted by the resolver and waiter
//!
//! Components receive a sink at construction instead of writing to a global
//! stream, so callers can route records to `tracing` or capture them.

use std::fmt;

use parking_lot::Mutex;
use tracing::warn;

use crate::LocatorSpec;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Diagnostic {
    /// A fallback locator resolved after the primary failed
    FallbackUsed {
        primary: LocatorSpec,
        fallback: LocatorSpec,
        /// Position in the candidate list (primary is 0)
        candidate_index: usize,
    },

    /// A bounded wait gave up
    WaitTimedOut { description: String, elapsed_ms: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FallbackUsed {
                primary, fallback, ..
            } => write!(
                f,
                "[Self-Healing] Used fallback locator: {} (primary failed: {})",
                fallback, primary
            ),
            Diagnostic::WaitTimedOut {
                description,
                elapsed_ms,
            } => write!(f, "wait for {} gave up after {}ms", description, elapsed_ms),
        }
    }
}

pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Default sink: one `tracing` warning per record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::FallbackUsed {
                primary,
                fallback,
                candidate_index,
            } => warn!(
                primary = %primary,
                fallback = %fallback,
                candidate_index = *candidate_index,
                "{}",
                diagnostic
            ),
            Diagnostic::WaitTimedOut { elapsed_ms, .. } => {
                warn!(elapsed_ms = *elapsed_ms, "{}", diagnostic)
            }
        }
    }
}

/// In-memory sink that keeps every record in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    /// Only the self-healing records
    pub fn fallbacks(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .iter()
            .filter(|d| matches!(d, Diagnostic::FallbackUsed { .. }))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl DiagnosticsSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.records.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_message_names_both_locators() {
        let record = Diagnostic::FallbackUsed {
            primary: LocatorSpec::new("#subscribe_email"),
            fallback: LocatorSpec::new("#subscribe_email_alt"),
            candidate_index: 1,
        };
        assert_eq!(
            record.to_string(),
            "[Self-Healing] Used fallback locator: #subscribe_email_alt (primary failed: #subscribe_email)"
        );
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(Diagnostic::WaitTimedOut {
            description: "a".into(),
            elapsed_ms: 1,
        });
        sink.emit(Diagnostic::FallbackUsed {
            primary: "#p".into(),
            fallback: "#f".into(),
            candidate_index: 1,
        });
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.fallbacks().len(), 1);
        sink.clear();
        assert!(sink.records().is_empty());
    }
}
