//! Trace contexts: the explicit handle threaded through a call chain.
//!
//! A [`TraceContext`] either has no active trace (standalone logging) or
//! points at a shared [`TraceRoot`] plus the frame it was opened for. Pass it
//! by reference to nested calls and open a child with [`TraceContext::begin`].
//!
//! Every operation that needs a root documents what it does without one;
//! none of them fail.

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracebuf_core::{EntryId, LogValue, Severity, TraceFields, TraceId};
use tracing::debug;

use crate::flush::{FlushGuard, FlushSummary};
use crate::logger::Logger;
use crate::record::LogRecord;
use crate::trigger::Trigger;

/// One nested call's contribution to the title lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    title: String,
    func_name: String,
    file: &'static str,
    line: u32,
}

impl Frame {
    fn new(title: String, label: &str, location: &'static Location<'static>) -> Self {
        Self {
            title,
            func_name: label.to_string(),
            file: location.file(),
            line: location.line(),
        }
    }

    /// Dash-joined lineage, e.g. `"A-B-C"`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Label the frame was opened with.
    pub fn func_name(&self) -> &str {
        &self.func_name
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// State of one top-level call chain.
#[derive(Debug)]
pub struct TraceRoot {
    pub(crate) trace_id: TraceId,
    pub(crate) title: String,
    /// Never decreases.
    pub(crate) max_severity: Severity,
    /// Append-only, in call order across all frames.
    pub(crate) records: Vec<LogRecord>,
    pub(crate) local_trigger: Option<Trigger>,
    /// Frames opened below the root, for introspection only.
    pub(crate) call_stack: Vec<Arc<Frame>>,
}

impl TraceRoot {
    fn new(trace_id: TraceId, title: &str) -> Self {
        Self {
            trace_id,
            title: title.to_string(),
            max_severity: Severity::Debug,
            records: Vec::new(),
            local_trigger: None,
            call_stack: Vec::new(),
        }
    }

    fn observe(&mut self, severity: Severity) {
        if severity > self.max_severity {
            self.max_severity = severity;
        }
    }
}

#[derive(Debug, Clone)]
struct Scope {
    root: Arc<Mutex<TraceRoot>>,
    trace_id: TraceId,
    frame: Arc<Frame>,
}

impl Scope {
    fn lock(&self) -> MutexGuard<'_, TraceRoot> {
        lock_root(&self.root)
    }

    fn fields(&self, severity: Severity) -> TraceFields {
        TraceFields {
            entry_id: EntryId::new(),
            trace_id: self.trace_id,
            severity,
            level: severity.name(),
            title: self.frame.title.clone(),
            func_name: self.frame.func_name.clone(),
            file: self.frame.file,
            line: self.frame.line,
        }
    }
}

pub(crate) fn lock_root(root: &Mutex<TraceRoot>) -> MutexGuard<'_, TraceRoot> {
    // Hooks and sinks never run under this lock, so a poisoned root still
    // holds a consistent buffer.
    root.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the active trace (if any) of the current call.
///
/// Cloning is cheap and clones share the same root. The root sits behind a
/// mutex, so a chain may fan out across threads; entries then land in the
/// order the threads reach the buffer.
#[derive(Debug, Clone)]
pub struct TraceContext {
    logger: Arc<Logger>,
    scope: Option<Scope>,
    inherited_id: Option<TraceId>,
}

impl TraceContext {
    pub(crate) fn detached(logger: Arc<Logger>, inherited_id: Option<TraceId>) -> Self {
        Self {
            logger,
            scope: None,
            inherited_id,
        }
    }

    /// A context with no active trace, bound to [`Logger::global`].
    pub fn background() -> Self {
        Logger::global().context()
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Open a frame named `label`.
    ///
    /// Without an active trace this opens a new root titled `label` and
    /// returns `true`. Otherwise the child frame is titled
    /// `<current title>-<label>`, recorded on the root's call stack, and
    /// `false` is returned. The caller's source location is captured for the
    /// formatter hooks.
    #[track_caller]
    pub fn begin(&self, label: &str) -> (TraceContext, bool) {
        let location = Location::caller();

        match &self.scope {
            None => {
                let trace_id = self.inherited_id.unwrap_or_default();
                let root = TraceRoot::new(trace_id, label);
                let frame = Arc::new(Frame::new(label.to_string(), label, location));

                debug!(trace_id = %trace_id, title = label, "trace root opened");

                let child = Self {
                    logger: self.logger.clone(),
                    scope: Some(Scope {
                        root: Arc::new(Mutex::new(root)),
                        trace_id,
                        frame,
                    }),
                    inherited_id: None,
                };
                (child, true)
            }
            Some(scope) => {
                let title = format!("{}-{}", scope.frame.title, label);
                let frame = Arc::new(Frame::new(title, label, location));
                scope.lock().call_stack.push(frame.clone());

                let child = Self {
                    logger: self.logger.clone(),
                    scope: Some(Scope {
                        root: scope.root.clone(),
                        trace_id: scope.trace_id,
                        frame,
                    }),
                    inherited_id: None,
                };
                (child, false)
            }
        }
    }

    /// [`begin`](Self::begin) without the root flag.
    #[track_caller]
    pub fn enter(&self, label: &str) -> TraceContext {
        self.begin(label).0
    }

    /// Override the thresholds for this context's root.
    ///
    /// No-op without an active trace.
    pub fn set_local_trigger(&self, occur: Severity, output: Severity) {
        if let Some(scope) = &self.scope {
            scope.lock().local_trigger = Some(Trigger::new(occur, output));
        }
    }

    /// Buffer an argument-list entry on the root.
    ///
    /// Without an active trace the entry is formatted with placeholder fields
    /// and dispatched to its per-severity sink right away.
    pub fn log(&self, severity: Severity, values: Vec<LogValue>) {
        let Some(scope) = &self.scope else {
            self.logger.log_standalone(severity, values);
            return;
        };

        let hook = self.logger.hooks().args;
        let values = hook(&scope.fields(severity), values);

        let mut root = scope.lock();
        root.observe(severity);
        root.records.push(LogRecord::ArgumentList { severity, values });
    }

    /// Buffer a template entry on the root.
    ///
    /// Without an active trace the entry is dispatched right away, like
    /// [`log`](Self::log).
    pub fn logf(&self, severity: Severity, template: &str, values: Vec<LogValue>) {
        let Some(scope) = &self.scope else {
            self.logger.logf_standalone(severity, template, values);
            return;
        };

        let hook = self.logger.hooks().template;
        let (template, values) = hook(&scope.fields(severity), template, values);

        let mut root = scope.lock();
        root.observe(severity);
        root.records.push(LogRecord::FormattedString {
            severity,
            template,
            values,
        });
    }

    /// Drain the root's buffer through the sinks.
    ///
    /// No-op without an active trace. The buffer is not cleared: flushing the
    /// same root twice emits every entry twice.
    pub fn catch_info(&self) -> FlushSummary {
        match &self.scope {
            Some(scope) => self.logger.flush(&scope.root),
            None => FlushSummary::default(),
        }
    }

    /// Flush the root when the returned guard is dropped (including on unwind).
    pub fn flush_on_drop(&self) -> FlushGuard {
        FlushGuard::new(self.clone())
    }

    /// Whether this context carries an active trace.
    pub fn is_traced(&self) -> bool {
        self.scope.is_some()
    }

    /// Id of the root trace.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.scope.as_ref().map(|s| s.trace_id)
    }

    /// Title of the current frame.
    pub fn title(&self) -> Option<&str> {
        self.scope.as_ref().map(|s| s.frame.title())
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.scope.as_ref().map(|s| s.frame.as_ref())
    }

    /// Title of the root frame.
    pub fn root_title(&self) -> Option<String> {
        self.scope.as_ref().map(|s| s.lock().title.clone())
    }

    /// Highest severity logged anywhere in the chain so far.
    pub fn max_severity(&self) -> Option<Severity> {
        self.scope.as_ref().map(|s| s.lock().max_severity)
    }

    pub fn local_trigger(&self) -> Option<Trigger> {
        self.scope.as_ref().and_then(|s| s.lock().local_trigger)
    }

    /// Titles of the frames opened below the root, in opening order.
    pub fn call_stack(&self) -> Vec<String> {
        match &self.scope {
            Some(scope) => scope
                .lock()
                .call_stack
                .iter()
                .map(|f| f.title.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Buffered entries on the root.
    pub fn records(&self) -> Vec<LogRecord> {
        match &self.scope {
            Some(scope) => scope.lock().records.clone(),
            None => Vec::new(),
        }
    }

    /// Number of buffered entries on the root.
    pub fn pending(&self) -> usize {
        self.scope.as_ref().map_or(0, |s| s.lock().records.len())
    }
}
