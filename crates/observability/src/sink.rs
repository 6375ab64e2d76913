//! `tracing`-backed sinks.
//!
//! Each sink turns a dispatch into one `tracing` event. Per-severity sinks
//! map `Debug -> DEBUG`, `Info -> INFO`, `Warning -> WARN` and
//! `Error | Fatal -> ERROR`; the Unified sink uses a configurable level and
//! marks its events with `escalated = true`.

use tracebuf_chain::{LogValue, Logger, Severity, Sink, SinkTarget};
use tracebuf_core::{join_values, render};
use tracing::Level;

/// Sink that emits a `tracing` event per dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingSink {
    target: SinkTarget,
    level: Level,
}

impl TracingSink {
    /// Sink for a per-severity slot.
    pub fn for_severity(severity: Severity) -> Self {
        Self {
            target: SinkTarget::Level(severity),
            level: level_for(severity),
        }
    }

    /// Sink for the Unified slot, emitting at `level`.
    pub fn unified(level: Level) -> Self {
        Self {
            target: SinkTarget::Unified,
            level,
        }
    }

    pub fn target(&self) -> SinkTarget {
        self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn event(&self, message: &str) {
        let slot = self.target.to_string();
        let escalated = self.target == SinkTarget::Unified;

        if self.level == Level::ERROR {
            tracing::error!(slot = %slot, escalated, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(slot = %slot, escalated, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(slot = %slot, escalated, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(slot = %slot, escalated, "{message}");
        } else {
            tracing::trace!(slot = %slot, escalated, "{message}");
        }
    }
}

impl Sink for TracingSink {
    fn emit(&self, values: &[LogValue]) {
        self.event(&join_values(values));
    }

    fn emit_template(&self, template: &str, values: &[LogValue]) {
        self.event(&render(template, values));
    }
}

/// `tracing` level used for a per-severity sink.
pub fn level_for(severity: Severity) -> Level {
    match severity {
        Severity::Debug => Level::DEBUG,
        Severity::Info => Level::INFO,
        Severity::Warning => Level::WARN,
        Severity::Error | Severity::Fatal => Level::ERROR,
    }
}

/// Register `tracing`-backed sinks for every slot of `logger`.
pub fn install_tracing_sinks(logger: &Logger, unified_level: Level) {
    for severity in Severity::ALL {
        logger.register_sink(SinkTarget::Level(severity), TracingSink::for_severity(severity));
    }
    logger.register_sink(SinkTarget::Unified, TracingSink::unified(unified_level));
}
