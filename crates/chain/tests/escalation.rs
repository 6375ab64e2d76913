use std::sync::Arc;

use proptest::prelude::*;
use tracebuf_chain::{
    Dispatch, LogValue, Logger, MemorySink, Severity, Sink, SinkTarget, TraceContext, TraceFields,
};
use tracebuf_core::args;

use tracebuf_chain::Severity::*;

/// A logger whose every sink records into memory, with hooks that pass the
/// caller's arguments through untouched so assertions can match on them.
struct Harness {
    logger: Arc<Logger>,
    debug: MemorySink,
    info: MemorySink,
    warning: MemorySink,
    error: MemorySink,
    fatal: MemorySink,
    unified: MemorySink,
    /// Every dispatch as `(target, line)` in global call order.
    journal: Arc<std::sync::Mutex<Vec<(SinkTarget, String)>>>,
}

impl Harness {
    fn new(occur: Severity, output: Severity) -> Self {
        let logger = Arc::new(Logger::default());
        logger.set_global_trigger(occur, output);
        logger.register_format(|_: &TraceFields, values: Vec<LogValue>| values);
        logger.register_format_template(|_: &TraceFields, template: &str, values: Vec<LogValue>| {
            (template.to_string(), values)
        });

        let journal = Arc::new(std::sync::Mutex::new(Vec::new()));
        let harness = Self {
            logger,
            debug: MemorySink::new(),
            info: MemorySink::new(),
            warning: MemorySink::new(),
            error: MemorySink::new(),
            fatal: MemorySink::new(),
            unified: MemorySink::new(),
            journal,
        };

        for target in [
            SinkTarget::Level(Debug),
            SinkTarget::Level(Info),
            SinkTarget::Level(Warning),
            SinkTarget::Level(Error),
            SinkTarget::Level(Fatal),
            SinkTarget::Unified,
        ] {
            let memory = harness.sink(target).clone();
            let journal = harness.journal.clone();
            harness.logger.register_sink(target, move |values: &[LogValue]| {
                memory.emit(values);
                journal
                    .lock()
                    .unwrap()
                    .push((target, tracebuf_core::join_values(values)));
            });
        }

        harness
    }

    fn sink(&self, target: SinkTarget) -> &MemorySink {
        match target {
            SinkTarget::Level(Debug) => &self.debug,
            SinkTarget::Level(Info) => &self.info,
            SinkTarget::Level(Warning) => &self.warning,
            SinkTarget::Level(Error) => &self.error,
            SinkTarget::Level(Fatal) => &self.fatal,
            SinkTarget::Unified => &self.unified,
        }
    }

    fn journal(&self) -> Vec<(SinkTarget, String)> {
        self.journal.lock().unwrap().clone()
    }
}

fn a(cx: &TraceContext) {
    let cx = cx.enter("A");
    let _flush = cx.flush_on_drop();
    cx.log(Debug, args!["Begin A"]);
    b(&cx);
    cx.log(Warning, args!["End A"]);
}

fn b(cx: &TraceContext) {
    let cx = cx.enter("B");
    cx.log(Debug, args!["Begin B"]);
    c(&cx);
    cx.log(Warning, args!["End B"]);
}

fn c(cx: &TraceContext) {
    let cx = cx.enter("C");
    cx.log(Error, args!["Begin C"]);
    cx.log(Warning, args!["End C"]);
}

#[test]
fn escalated_chain_diverts_entries_at_or_above_output() {
    let h = Harness::new(Error, Warning);
    let root = h.logger.context().enter("root");

    root.log(Debug, args!["d"]);
    root.log(Info, args!["i"]);
    root.log(Error, args!["e"]);
    root.log(Warning, args!["w"]);
    root.catch_info();

    assert_eq!(h.debug.lines(), vec!["d"]);
    assert_eq!(h.info.lines(), vec!["i"]);
    assert_eq!(h.unified.lines(), vec!["e", "w"]);
    assert!(h.error.is_empty());
    assert!(h.warning.is_empty());
}

#[test]
fn quiet_chain_goes_to_per_severity_sinks_only() {
    let h = Harness::new(Error, Warning);
    let root = h.logger.context().enter("root");

    root.log(Debug, args!["d"]);
    root.log(Info, args!["i"]);
    root.catch_info();

    assert_eq!(h.debug.lines(), vec!["d"]);
    assert_eq!(h.info.lines(), vec!["i"]);
    assert!(h.unified.is_empty());
}

#[test]
fn nothing_is_emitted_before_the_flush() {
    let h = Harness::new(Error, Warning);
    let root = h.logger.context().enter("root");

    root.log(Fatal, args!["f"]);
    root.logf(Info, "{} pending", args![1]);

    assert!(h.journal().is_empty());
    assert_eq!(root.pending(), 2);
}

#[test]
fn dispatch_order_matches_call_order_across_frames() {
    let h = Harness::new(Error, Warning);
    a(&h.logger.context());

    assert_eq!(
        h.journal(),
        vec![
            (SinkTarget::Level(Debug), "Begin A".to_string()),
            (SinkTarget::Level(Debug), "Begin B".to_string()),
            (SinkTarget::Unified, "Begin C".to_string()),
            (SinkTarget::Unified, "End C".to_string()),
            (SinkTarget::Unified, "End B".to_string()),
            (SinkTarget::Unified, "End A".to_string()),
        ]
    );
}

#[test]
fn local_trigger_wins_and_siblings_keep_the_global_one() {
    let h = Harness::new(Fatal, Fatal);

    let first = h.logger.context().enter("first");
    first.set_local_trigger(Error, Debug);
    first.log(Debug, args!["first-d"]);
    first.log(Error, args!["first-e"]);

    let second = h.logger.context().enter("second");
    second.log(Debug, args!["second-d"]);
    second.log(Error, args!["second-e"]);

    first.catch_info();
    second.catch_info();

    assert_eq!(h.unified.lines(), vec!["first-d", "first-e"]);
    assert_eq!(h.debug.lines(), vec!["second-d"]);
    assert_eq!(h.error.lines(), vec!["second-e"]);
}

#[test]
fn global_trigger_changes_apply_to_unflushed_roots() {
    let h = Harness::new(Fatal, Debug);
    let root = h.logger.context().enter("root");
    root.log(Error, args!["e"]);

    h.logger.set_global_trigger(Error, Debug);
    root.catch_info();

    assert_eq!(h.unified.lines(), vec!["e"]);
}

#[test]
fn template_entries_reach_emit_template() {
    let h = Harness::new(Error, Warning);
    let template_sink = MemorySink::new();
    h.logger.register_unified(template_sink.clone());

    let root = h.logger.context().enter("AF");
    root.logf(Error, "Begin {}. {}", args!["CF", "la~la~la~"]);
    root.catch_info();

    assert_eq!(
        template_sink.dispatched(),
        vec![Dispatch::Template {
            template: "Begin {}. {}".to_string(),
            values: args!["CF", "la~la~la~"],
        }]
    );
    assert_eq!(template_sink.lines(), vec!["Begin CF. la~la~la~"]);
}

#[test]
fn standalone_logging_bypasses_the_buffer() {
    let h = Harness::new(Error, Debug);
    let cx = h.logger.context();

    cx.log(Error, args!["now"]);

    assert_eq!(h.error.lines(), vec!["now"]);
    assert!(h.unified.is_empty());
    assert_eq!(cx.catch_info().dispatched(), 0);
    assert_eq!(h.journal().len(), 1);
}

#[test]
fn no_root_operations_do_not_dispatch() {
    let h = Harness::new(Debug, Debug);
    let cx = h.logger.context();

    cx.set_local_trigger(Debug, Debug);
    cx.catch_info();

    assert!(h.journal().is_empty());
}

#[test]
fn unified_registration_only_affects_later_flushes() {
    let h = Harness::new(Error, Debug);
    let replacement = MemorySink::new();

    let first = h.logger.context().enter("first");
    first.log(Error, args!["one"]);
    first.catch_info();

    h.logger.register_unified(replacement.clone());

    let second = h.logger.context().enter("second");
    second.log(Error, args!["two"]);
    second.catch_info();

    assert_eq!(h.unified.lines(), vec!["one"]);
    assert_eq!(replacement.lines(), vec!["two"]);
}

#[test]
fn flushing_twice_emits_twice() {
    let h = Harness::new(Error, Debug);
    let root = h.logger.context().enter("root");
    root.log(Info, args!["once"]);

    root.catch_info();
    root.catch_info();

    assert_eq!(h.info.lines(), vec!["once", "once"]);
}

fn severity() -> impl Strategy<Value = Severity> {
    (0u8..5).prop_map(|r| Severity::from_rank(r).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: a flush dispatches each buffered entry exactly once, in
    /// insertion order, to the target the trigger selects for it.
    #[test]
    fn flush_preserves_order_and_routes_by_trigger(
        levels in prop::collection::vec(severity(), 0..24),
        occur in severity(),
        output in severity(),
    ) {
        let h = Harness::new(occur, output);
        let root = h.logger.context().enter("root");
        for (i, level) in levels.iter().enumerate() {
            root.log(*level, args![i]);
        }
        root.catch_info();

        let max = levels.iter().copied().max().unwrap_or(Debug);
        let expected: Vec<(SinkTarget, String)> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let target = if max >= occur && *level >= output {
                    SinkTarget::Unified
                } else {
                    SinkTarget::Level(*level)
                };
                (target, i.to_string())
            })
            .collect();

        prop_assert_eq!(h.journal(), expected);
    }
}
