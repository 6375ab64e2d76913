//! `tracebuf-chain` — deferred, severity-triggered log buffering.
//!
//! Log calls made inside a traced call chain are buffered on the chain's
//! root and only reach the sinks when the root is flushed. Routing is decided
//! at flush time from the highest severity seen anywhere in the chain: once
//! that reaches the *occur* threshold, every entry at or above the *output*
//! threshold goes to the Unified sink; everything else goes to its own
//! per-severity sink.
//!
//! ```
//! use std::sync::Arc;
//! use tracebuf_chain::{Logger, MemorySink, Severity};
//! use tracebuf_core::args;
//!
//! let logger = Arc::new(Logger::default());
//! let unified = MemorySink::new();
//! logger.register_unified(unified.clone());
//!
//! let root = logger.context().enter("checkout");
//! let guard = root.flush_on_drop();
//! root.log(Severity::Info, args!["reserving stock"]);
//! root.enter("payment").log(Severity::Error, args!["card declined"]);
//! drop(guard);
//!
//! assert_eq!(unified.len(), 2);
//! ```

pub mod config;
pub mod context;
pub mod flush;
pub mod format;
pub mod logger;
pub mod record;
pub mod sink;
pub mod trigger;

pub use config::LoggerConfig;
pub use context::{Frame, TraceContext, TraceRoot};
pub use flush::{FlushGuard, FlushSummary};
pub use format::{ArgsFormatter, FormatHooks, TemplateFormatter};
pub use logger::Logger;
pub use record::LogRecord;
pub use sink::{Dispatch, MemorySink, NoopSink, Sink, SinkRegistry, SinkTarget};
pub use trigger::Trigger;

pub use tracebuf_core::{LogValue, Severity, TraceFields, TraceId};
