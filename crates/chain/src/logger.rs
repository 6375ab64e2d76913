//! The logger configuration object: sink registry, formatter hooks and the
//! global trigger.
//!
//! Lifecycle: build (or fetch the process-wide instance), register sinks and
//! hooks during initialization, then hand out [`TraceContext`]s. Registration
//! after that point is allowed and takes effect for later dispatches only.

use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracebuf_core::{LogValue, Severity, TraceFields, TraceId};
use tracing::trace;

use crate::config::LoggerConfig;
use crate::context::TraceContext;
use crate::format::FormatHooks;
use crate::sink::{Sink, SinkRegistry, SinkTarget};
use crate::trigger::Trigger;

#[derive(Debug, Default)]
struct LoggerState {
    sinks: SinkRegistry,
    hooks: FormatHooks,
    trigger: Trigger,
}

/// Sinks, hooks and thresholds shared by every trace created from it.
#[derive(Debug, Default)]
pub struct Logger {
    state: RwLock<LoggerState>,
}

static GLOBAL: OnceLock<Arc<Logger>> = OnceLock::new();

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            state: RwLock::new(LoggerState {
                trigger: config.trigger,
                ..LoggerState::default()
            }),
        }
    }

    /// Process-wide logger, created with default settings on first use.
    pub fn global() -> &'static Arc<Logger> {
        GLOBAL.get_or_init(|| Arc::new(Logger::default()))
    }

    /// Install `logger` as the process-wide instance.
    ///
    /// Returns the logger back if the global was already initialized.
    pub fn install_global(logger: Arc<Logger>) -> Result<(), Arc<Logger>> {
        GLOBAL.set(logger)
    }

    /// A context with no active trace.
    ///
    /// Logging against it dispatches immediately; `begin` on it opens a root.
    pub fn context(self: &Arc<Self>) -> TraceContext {
        TraceContext::detached(self.clone(), None)
    }

    /// Like [`context`](Self::context), but the root opened from it adopts
    /// `trace_id` instead of generating one.
    pub fn context_with_trace_id(self: &Arc<Self>, trace_id: TraceId) -> TraceContext {
        TraceContext::detached(self.clone(), Some(trace_id))
    }

    pub fn register_sink(&self, target: SinkTarget, sink: impl Sink + 'static) {
        self.register_shared_sink(target, Arc::new(sink));
    }

    pub fn register_shared_sink(&self, target: SinkTarget, sink: Arc<dyn Sink>) {
        self.write().sinks.set(target, sink);
    }

    pub fn register_debug(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Level(Severity::Debug), sink);
    }

    pub fn register_info(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Level(Severity::Info), sink);
    }

    pub fn register_warning(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Level(Severity::Warning), sink);
    }

    pub fn register_error(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Level(Severity::Error), sink);
    }

    pub fn register_fatal(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Level(Severity::Fatal), sink);
    }

    pub fn register_unified(&self, sink: impl Sink + 'static) {
        self.register_sink(SinkTarget::Unified, sink);
    }

    /// Replace the argument-list formatter hook.
    pub fn register_format<F>(&self, hook: F)
    where
        F: Fn(&TraceFields, Vec<LogValue>) -> Vec<LogValue> + Send + Sync + 'static,
    {
        self.write().hooks.args = Arc::new(hook);
    }

    /// Replace the template formatter hook.
    pub fn register_format_template<F>(&self, hook: F)
    where
        F: Fn(&TraceFields, &str, Vec<LogValue>) -> (String, Vec<LogValue>) + Send + Sync + 'static,
    {
        self.write().hooks.template = Arc::new(hook);
    }

    /// Replace both thresholds for every root without a local trigger.
    ///
    /// Routing is decided at flush time, so roots not yet flushed pick this up.
    pub fn set_global_trigger(&self, occur: Severity, output: Severity) {
        self.write().trigger = Trigger::new(occur, output);
    }

    pub fn global_trigger(&self) -> Trigger {
        self.read().trigger
    }

    /// Snapshot of the registry. Later registrations do not affect it.
    pub fn sinks(&self) -> SinkRegistry {
        self.read().sinks.clone()
    }

    /// Snapshot of the formatter hooks.
    pub fn hooks(&self) -> FormatHooks {
        self.read().hooks.clone()
    }

    pub(crate) fn sink(&self, target: SinkTarget) -> Arc<dyn Sink> {
        self.read().sinks.get(target).clone()
    }

    /// Format and dispatch right away, bypassing any buffer.
    pub(crate) fn log_standalone(&self, severity: Severity, values: Vec<LogValue>) {
        let fields = TraceFields::standalone(severity);
        let hook = self.read().hooks.args.clone();
        let formatted = hook(&fields, values);

        trace!(severity = %severity, "standalone log dispatched");
        self.sink(SinkTarget::Level(severity)).emit(&formatted);
    }

    pub(crate) fn logf_standalone(&self, severity: Severity, template: &str, values: Vec<LogValue>) {
        let fields = TraceFields::standalone(severity);
        let hook = self.read().hooks.template.clone();
        let (template, formatted) = hook(&fields, template, values);

        trace!(severity = %severity, "standalone template log dispatched");
        self.sink(SinkTarget::Level(severity))
            .emit_template(&template, &formatted);
    }

    // A panicking sink or hook never runs under this lock, so recovering a
    // poisoned guard cannot expose a half-written registry.
    fn read(&self) -> RwLockReadGuard<'_, LoggerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LoggerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
