//! Flush engine: drains a root's buffer through the sink registry.

use std::sync::Mutex;

use tracing::debug;

use crate::context::{TraceContext, TraceRoot, lock_root};
use crate::logger::Logger;
use crate::record::LogRecord;
use crate::sink::SinkTarget;

/// What a flush did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    /// Whether the chain reached the effective occur threshold.
    pub escalated: bool,
    /// Entries sent to the Unified sink.
    pub unified: usize,
    /// Entries sent to their own per-severity sink.
    pub per_severity: usize,
}

impl FlushSummary {
    pub fn dispatched(&self) -> usize {
        self.unified + self.per_severity
    }
}

impl Logger {
    /// Route every buffered entry of `root`, in insertion order.
    ///
    /// The root's local trigger wins over the global one. The registry is
    /// snapshotted up front and the root lock is released before any sink
    /// runs, so sinks may log or register freely.
    pub(crate) fn flush(&self, root: &Mutex<TraceRoot>) -> FlushSummary {
        let (trace_id, max_observed, local_trigger, records) = {
            let root = lock_root(root);
            (
                root.trace_id,
                root.max_severity,
                root.local_trigger,
                root.records.clone(),
            )
        };

        let trigger = local_trigger.unwrap_or_else(|| self.global_trigger());
        let sinks = self.sinks();
        let mut summary = FlushSummary {
            escalated: trigger.escalated(max_observed),
            ..FlushSummary::default()
        };

        for record in &records {
            let target = trigger.route(max_observed, record.severity());
            match target {
                SinkTarget::Unified => summary.unified += 1,
                SinkTarget::Level(_) => summary.per_severity += 1,
            }

            let sink = sinks.get(target);
            match record {
                LogRecord::ArgumentList { values, .. } => sink.emit(values),
                LogRecord::FormattedString {
                    template, values, ..
                } => sink.emit_template(template, values),
            }
        }

        debug!(
            trace_id = %trace_id,
            max_severity = %max_observed,
            occur = %trigger.occur,
            output = %trigger.output,
            escalated = summary.escalated,
            unified = summary.unified,
            per_severity = summary.per_severity,
            "trace flushed"
        );

        summary
    }
}

/// Flushes its context's root when dropped.
///
/// Hold one for the lifetime of the root call so the buffer is drained on
/// every exit path, early returns and panics included.
#[must_use = "the root is flushed when the guard is dropped"]
#[derive(Debug)]
pub struct FlushGuard {
    context: TraceContext,
}

impl FlushGuard {
    pub(crate) fn new(context: TraceContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &TraceContext {
        &self.context
    }
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        self.context.catch_info();
    }
}
