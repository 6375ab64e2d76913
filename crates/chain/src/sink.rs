//! Output sinks and the registry that maps severities to them.
//!
//! A sink is the boundary to whatever actually writes log lines (a `tracing`
//! subscriber, stdout, a test buffer). The registry is swapped wholesale or
//! per target at runtime; the last registration wins.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracebuf_core::{LogValue, Severity, join_values, render};

/// Destination for formatted log output.
///
/// Sinks are called synchronously from the logging call (standalone mode) or
/// from the flush. A panic inside a sink propagates to that caller.
pub trait Sink: Send + Sync {
    /// Receive an argument list produced by the argument-list formatter.
    fn emit(&self, values: &[LogValue]);

    /// Receive a template plus arguments produced by the template formatter.
    ///
    /// Defaults to rendering the template and emitting it as one value.
    fn emit_template(&self, template: &str, values: &[LogValue]) {
        self.emit(&[LogValue::Str(render(template, values))]);
    }
}

impl<F> Sink for F
where
    F: Fn(&[LogValue]) + Send + Sync,
{
    fn emit(&self, values: &[LogValue]) {
        self(values)
    }
}

/// Sink that discards everything (the default for every target).
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn emit(&self, _values: &[LogValue]) {}

    fn emit_template(&self, _template: &str, _values: &[LogValue]) {}
}

/// Registry slot a sink is registered under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SinkTarget {
    /// Per-severity sink.
    Level(Severity),
    /// Destination for entries diverted from an escalated chain.
    Unified,
}

impl From<Severity> for SinkTarget {
    fn from(value: Severity) -> Self {
        SinkTarget::Level(value)
    }
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Level(severity) => fmt::Display::fmt(severity, f),
            SinkTarget::Unified => f.write_str("Unified"),
        }
    }
}

/// One sink per severity plus the Unified sink.
#[derive(Clone)]
pub struct SinkRegistry {
    debug: Arc<dyn Sink>,
    info: Arc<dyn Sink>,
    warning: Arc<dyn Sink>,
    error: Arc<dyn Sink>,
    fatal: Arc<dyn Sink>,
    unified: Arc<dyn Sink>,
}

impl Default for SinkRegistry {
    fn default() -> Self {
        let noop: Arc<dyn Sink> = Arc::new(NoopSink);
        Self {
            debug: noop.clone(),
            info: noop.clone(),
            warning: noop.clone(),
            error: noop.clone(),
            fatal: noop.clone(),
            unified: noop,
        }
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkRegistry").finish_non_exhaustive()
    }
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: SinkTarget) -> &Arc<dyn Sink> {
        match target {
            SinkTarget::Level(Severity::Debug) => &self.debug,
            SinkTarget::Level(Severity::Info) => &self.info,
            SinkTarget::Level(Severity::Warning) => &self.warning,
            SinkTarget::Level(Severity::Error) => &self.error,
            SinkTarget::Level(Severity::Fatal) => &self.fatal,
            SinkTarget::Unified => &self.unified,
        }
    }

    pub fn set(&mut self, target: SinkTarget, sink: Arc<dyn Sink>) {
        let slot = match target {
            SinkTarget::Level(Severity::Debug) => &mut self.debug,
            SinkTarget::Level(Severity::Info) => &mut self.info,
            SinkTarget::Level(Severity::Warning) => &mut self.warning,
            SinkTarget::Level(Severity::Error) => &mut self.error,
            SinkTarget::Level(Severity::Fatal) => &mut self.fatal,
            SinkTarget::Unified => &mut self.unified,
        };
        *slot = sink;
    }
}

/// What a [`MemorySink`] received, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Values(Vec<LogValue>),
    Template {
        template: String,
        values: Vec<LogValue>,
    },
}

impl Dispatch {
    /// Single-line rendering of the dispatch.
    pub fn rendered(&self) -> String {
        match self {
            Dispatch::Values(values) => join_values(values),
            Dispatch::Template { template, values } => render(template, values),
        }
    }
}

/// Recording sink for tests/dev.
///
/// Clones share the same buffer, so keep one handle and register another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    dispatched: Arc<Mutex<Vec<Dispatch>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far.
    pub fn dispatched(&self) -> Vec<Dispatch> {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.dispatched().iter().map(Dispatch::rendered).collect()
    }

    pub fn len(&self) -> usize {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, dispatch: Dispatch) {
        self.dispatched
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dispatch);
    }
}

impl Sink for MemorySink {
    fn emit(&self, values: &[LogValue]) {
        self.push(Dispatch::Values(values.to_vec()));
    }

    fn emit_template(&self, template: &str, values: &[LogValue]) {
        self.push(Dispatch::Template {
            template: template.to_string(),
            values: values.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracebuf_core::args;

    #[test]
    fn closures_are_sinks_and_render_templates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_sink = seen.clone();
        let sink = move |values: &[LogValue]| {
            seen_by_sink.lock().unwrap().push(join_values(values));
        };

        sink.emit(&args!["a", 1]);
        sink.emit_template("x={}", &args![2]);

        assert_eq!(*seen.lock().unwrap(), vec!["a 1".to_string(), "x=2".to_string()]);
    }

    #[test]
    fn registry_last_registration_wins() {
        let first = MemorySink::new();
        let second = MemorySink::new();
        let mut registry = SinkRegistry::new();

        registry.set(SinkTarget::Unified, Arc::new(first.clone()));
        registry.set(SinkTarget::Unified, Arc::new(second.clone()));
        registry.get(SinkTarget::Unified).emit(&args!["hello"]);

        assert!(first.is_empty());
        assert_eq!(second.lines(), vec!["hello"]);
    }

    #[test]
    fn targets_are_independent() {
        let warn = MemorySink::new();
        let mut registry = SinkRegistry::new();
        registry.set(Severity::Warning.into(), Arc::new(warn.clone()));

        registry.get(SinkTarget::Level(Severity::Error)).emit(&args!["dropped"]);
        registry.get(SinkTarget::Level(Severity::Warning)).emit(&args!["kept"]);

        assert_eq!(warn.lines(), vec!["kept"]);
    }

    #[test]
    fn memory_sink_keeps_template_and_values_apart() {
        let sink = MemorySink::new();
        sink.emit_template("{} of {}", &args![1, 2]);

        assert_eq!(
            sink.dispatched(),
            vec![Dispatch::Template {
                template: "{} of {}".to_string(),
                values: args![1, 2],
            }]
        );
        assert_eq!(sink.lines(), vec!["1 of 2"]);
    }
}
