//! Process setup and adapters between `tracebuf` and the `tracing` ecosystem.

use tracebuf_chain::Logger;

/// Initialize process-wide observability: the `tracing` subscriber, then
/// `tracing`-backed sinks on the global logger.
///
/// Safe to call multiple times; the subscriber is only installed once and
/// re-registering the sinks is idempotent.
pub fn init() {
    subscriber::init();
    sink::install_tracing_sinks(Logger::global(), tracing::Level::ERROR);
}

/// Subscriber configuration (filters, output format).
pub mod subscriber;

/// Sinks that forward to `tracing` events.
pub mod sink;

/// Timestamped formatter hooks.
pub mod format;

pub use format::{install_timestamped_format, trim_path};
pub use sink::{TracingSink, install_tracing_sinks};
pub use subscriber::{LogFormat, LogFormatParseError, SubscriberConfig};
